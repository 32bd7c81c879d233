//! Data model for generated profiles, photo analyses, and chat messages.
//!
//! These types cross the content-provider boundary: they are created by a
//! [`ContentProvider`](crate::provider::ContentProvider), appended to the
//! deck buffer, and never mutated afterwards. Serde derives match the JSON
//! shape the generative backend returns.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::deck::DeckItem;

/// Facial-aesthetics stat block attached to every profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Jawline rating, 1–10.
    pub jawline: f32,
    /// Canthal tilt description, e.g. "Positive", "Neutral", "Prey Eyes".
    #[serde(rename = "canthalTilt")]
    pub canthal_tilt: String,
    /// Consecutive days of mewing.
    #[serde(rename = "mewingStreak")]
    pub mewing_streak: u32,
    /// Height as displayed, e.g. "6'2\"".
    pub height: String,
}

/// A single swipeable profile card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique, stable for the profile's lifetime.
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    pub tagline: String,
    pub bio: String,
    pub stats: ProfileStats,
    /// Image reference: a local placeholder path or a data URL from the
    /// image generator.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "isSuperMog", default)]
    pub is_super_mog: bool,
}

impl DeckItem for Profile {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Per-feature score breakdown in a photo analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBreakdown {
    pub jawline: u8,
    pub eyes: u8,
    pub skin: u8,
    pub symmetry: u8,
    /// Phenotype label, e.g. "Warrior Skull", "Potato".
    pub phenotype: String,
}

/// Result of analyzing a user photo.
///
/// Always a valid, displayable value: providers substitute a sentinel
/// result on failure instead of surfacing an error (see
/// [`AnalysisResult::quota_exceeded`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall rating on the 1–10 forum scale.
    pub score: u8,
    /// Tier title, e.g. "High Tier Normie" or "Chadlite".
    pub title: String,
    pub analysis: String,
    pub improvements: Vec<String>,
    pub breakdown: AnalysisBreakdown,
}

impl AnalysisResult {
    /// The degraded-but-valid sentinel returned when the analysis backend
    /// is unavailable or rate-limited. Callers never see an error, only
    /// this shape.
    pub fn quota_exceeded() -> Self {
        Self {
            score: 1,
            title: "Quota Exceeded (It's Over)".to_string(),
            analysis: "The AI server is currently mogged by high traffic. Try again in a moment."
                .to_string(),
            improvements: vec![
                "Wait for API cooldown".to_string(),
                "Mew while you wait".to_string(),
            ],
            breakdown: AnalysisBreakdown {
                jawline: 0,
                eyes: 0,
                skin: 0,
                symmetry: 0,
                phenotype: "404 Face Not Found".to_string(),
            },
        }
    }
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One message in a match's chat thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}
