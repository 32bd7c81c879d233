//! Tracing subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging with an env-filter.
///
/// `RUST_LOG` overrides `default_filter` when set. Call once at process
/// start; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
