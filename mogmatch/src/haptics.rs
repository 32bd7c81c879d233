//! Haptic output abstraction.
//!
//! The pointer tracker fires a single short pulse when a drag first
//! crosses the haptic trigger distance. Hosts without a vibration
//! capability plug in [`NoopHaptics`]; the call is fire-and-forget and
//! must never block or fail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fire-and-forget haptic sink.
pub trait Haptics: Send + Sync {
    /// Emit a vibration pulse of roughly `duration_ms` milliseconds.
    ///
    /// Implementations must return immediately; dropping the pulse on
    /// hosts without haptic hardware is expected behavior.
    fn pulse(&self, duration_ms: u32);
}

/// Haptics sink for hosts without vibration hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn pulse(&self, _duration_ms: u32) {}
}

/// Counting haptics sink for tests: records how many pulses fired.
#[derive(Debug, Default)]
pub struct CountingHaptics {
    pulses: AtomicUsize,
}

impl CountingHaptics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pulse_count(&self) -> usize {
        self.pulses.load(Ordering::SeqCst)
    }
}

impl Haptics for CountingHaptics {
    fn pulse(&self, _duration_ms: u32) {
        self.pulses.fetch_add(1, Ordering::SeqCst);
    }
}
