//! Content provider abstraction.
//!
//! The deck treats content generation as an opaque async collaborator:
//! it produces a [`Profile`] from nothing, a photo analysis from an
//! image, and a chat reply from a conversation. Failures degrade inside
//! the provider wherever a local substitute exists; only
//! [`ContentProvider::generate_profile`] may
//! surface an error, and even then the buffer retries rather than
//! aborting the gesture path.
//!
//! # Implementations
//!
//! - [`OfflineProvider`]: canned personas and local placeholder images;
//!   never fails. Also serves as the degradation source for the
//!   generative provider.
//! - [`GeminiProvider`]: generative backend over an injected
//!   [`HttpClient`], with per-call fallbacks.

mod gemini;
mod http;
mod offline;
mod types;

pub use gemini::GeminiProvider;
pub use http::{HttpClient, ReqwestClient};
pub use offline::OfflineProvider;
pub use types::{BoxFuture, ContentProvider, ProviderError};

#[cfg(test)]
pub use http::tests::MockHttpClient;

use crate::profile::Profile;

/// Placeholder card images bundled with the app, used whenever image
/// generation is unavailable.
pub(crate) const PLACEHOLDER_IMAGES: &[&str] = &[
    "/images/1739520543232.png",
    "/images/1739520759673.png",
    "/images/1739520892533.png",
    "/images/1739521031759.png",
    "/images/1739521119766.png",
    "/images/46333.jpg",
    "/images/58113.jpg",
    "/images/70554.jpg",
    "/images/81310.jpg",
    "/images/looksmax-mewing.png",
];

/// Pick a random bundled placeholder image path.
pub(crate) fn random_placeholder_image() -> String {
    use rand::seq::IndexedRandom;

    let mut rng = rand::rng();
    PLACEHOLDER_IMAGES
        .choose(&mut rng)
        .expect("placeholder image pool is non-empty")
        .to_string()
}

/// True if the profile's image reference points at a bundled placeholder.
pub fn is_placeholder_image(profile: &Profile) -> bool {
    PLACEHOLDER_IMAGES.contains(&profile.image_url.as_str())
}
