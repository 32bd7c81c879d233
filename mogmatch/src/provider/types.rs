//! Provider trait and error types.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::profile::{AnalysisResult, ChatMessage, Profile};

/// Boxed future used for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur talking to a content backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport-level or non-success HTTP response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend rejected the call for quota reasons.
    #[error("provider quota exceeded")]
    RateLimited,

    /// The backend answered but the payload didn't have the expected
    /// shape.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Async content-generation collaborator.
///
/// # Failure contract
///
/// - [`generate_profile`](Self::generate_profile) may fail; callers (the
///   deck buffer) log and retry on the next buffer check.
/// - [`analyze_photo`](Self::analyze_photo) never fails: implementations
///   return a degraded-but-valid sentinel result instead (see
///   [`AnalysisResult::quota_exceeded`]).
/// - [`chat_reply`](Self::chat_reply) never fails: implementations
///   return a fixed apology line instead.
///
/// Uses boxed futures so providers can be held as trait objects behind
/// `Arc<dyn ContentProvider>` and shared with spawned fetch tasks.
pub trait ContentProvider: Send + Sync {
    /// Generate one profile card, including an image reference.
    ///
    /// Implementations with a local fallback substitute it internally on
    /// image failure (the caller never learns image generation failed).
    fn generate_profile(&self) -> BoxFuture<'_, Result<Profile, ProviderError>>;

    /// Analyze a user photo, supplied as base64-encoded image bytes.
    fn analyze_photo<'a>(&'a self, image_b64: &'a str) -> BoxFuture<'a, AnalysisResult>;

    /// Produce an in-character chat reply from `persona` to
    /// `new_message`, given the conversation so far.
    fn chat_reply<'a>(
        &'a self,
        persona: &'a Profile,
        history: &'a [ChatMessage],
        new_message: &'a str,
    ) -> BoxFuture<'a, String>;
}
