//! Offline provider: canned personas and placeholder images.
//!
//! Serves two roles: a fully self-contained provider for demos and
//! tests, and the substitution source the generative provider falls back
//! to when the backend is unavailable or rate-limited.

use std::time::Duration;

use uuid::Uuid;

use crate::profile::{AnalysisResult, ChatMessage, Profile, ProfileStats};

use super::types::{BoxFuture, ContentProvider, ProviderError};
use super::random_placeholder_image;

struct PersonaSeed {
    name: &'static str,
    age: u8,
    tagline: &'static str,
    bio: &'static str,
    jawline: f32,
    canthal_tilt: &'static str,
    mewing_streak: u32,
    height: &'static str,
}

const PERSONAS: &[PersonaSeed] = &[
    PersonaSeed {
        name: "Giga Chad",
        age: 25,
        tagline: "I don't speak to people with negative canthal tilt.",
        bio: "Strictly mewing 24/7. If you breathe through your mouth, swipe left. \
              Measuring my gonial angle daily.",
        jawline: 10.0,
        canthal_tilt: "Positive",
        mewing_streak: 5000,
        height: "6'8\"",
    },
    PersonaSeed {
        name: "Jordan B.",
        age: 23,
        tagline: "Just woke up like this.",
        bio: "Hunter eyes are a lifestyle, not a choice. My bone structure pays my rent.",
        jawline: 9.8,
        canthal_tilt: "Positive",
        mewing_streak: 1200,
        height: "6'2\"",
    },
    PersonaSeed {
        name: "Mewing Master",
        age: 19,
        tagline: "Tongue posture > bad posture.",
        bio: "I haven't spoken in 3 years to maintain suction hold. Text me only.",
        jawline: 8.5,
        canthal_tilt: "Neutral",
        mewing_streak: 900,
        height: "6'0\"",
    },
    PersonaSeed {
        name: "Chico L.",
        age: 22,
        tagline: "Mogging the entire industry.",
        bio: "It's all about the pheno. You either have it or you don't.",
        jawline: 9.5,
        canthal_tilt: "Positive",
        mewing_streak: 2000,
        height: "6'3\"",
    },
];

const CANNED_REPLIES: &[&str] = &[
    "Mogged. Next question.",
    "Can't talk long, mid mewing set.",
    "It's over for mouth breathers, not for you though. Maybe.",
    "We're so back. Send your canthal tilt stats.",
];

/// Provider backed entirely by bundled data. Never fails.
pub struct OfflineProvider {
    latency: Option<Duration>,
}

impl OfflineProvider {
    pub fn new() -> Self {
        Self { latency: None }
    }

    /// Simulate network latency before each response (demo realism).
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn pick_profile() -> Profile {
        use rand::seq::IndexedRandom;

        let mut rng = rand::rng();
        let seed = PERSONAS
            .choose(&mut rng)
            .expect("persona catalog is non-empty");
        Profile {
            id: Uuid::new_v4(),
            name: seed.name.to_string(),
            age: seed.age,
            tagline: seed.tagline.to_string(),
            bio: seed.bio.to_string(),
            stats: ProfileStats {
                jawline: seed.jawline,
                canthal_tilt: seed.canthal_tilt.to_string(),
                mewing_streak: seed.mewing_streak,
                height: seed.height.to_string(),
            },
            image_url: random_placeholder_image(),
            is_super_mog: false,
        }
    }
}

impl Default for OfflineProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentProvider for OfflineProvider {
    fn generate_profile(&self) -> BoxFuture<'_, Result<Profile, ProviderError>> {
        Box::pin(async move {
            self.simulate_latency().await;
            Ok(Self::pick_profile())
        })
    }

    fn analyze_photo<'a>(&'a self, _image_b64: &'a str) -> BoxFuture<'a, AnalysisResult> {
        Box::pin(async move {
            self.simulate_latency().await;
            AnalysisResult::quota_exceeded()
        })
    }

    fn chat_reply<'a>(
        &'a self,
        _persona: &'a Profile,
        _history: &'a [ChatMessage],
        _new_message: &'a str,
    ) -> BoxFuture<'a, String> {
        Box::pin(async move {
            use rand::seq::IndexedRandom;

            self.simulate_latency().await;
            let mut rng = rand::rng();
            CANNED_REPLIES
                .choose(&mut rng)
                .expect("canned reply list is non-empty")
                .to_string()
        })
    }
}
