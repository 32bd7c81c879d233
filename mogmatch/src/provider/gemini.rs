//! Generative content provider.
//!
//! Talks to the Gemini `generateContent` REST endpoints through an
//! injected [`HttpClient`]. Every call degrades locally on failure:
//!
//! - profile text generation falls back to a canned persona,
//! - image generation falls back to a bundled placeholder image,
//! - photo analysis falls back to the quota-exceeded sentinel,
//! - chat replies fall back to a fixed apology line.
//!
//! Rate-limit rejections are logged at `warn` (they are expected under
//! quota pressure); other failures at `error`.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};
use uuid::Uuid;

use crate::profile::{AnalysisResult, ChatMessage, ChatRole, Profile, ProfileStats};

use super::http::HttpClient;
use super::offline::OfflineProvider;
use super::random_placeholder_image;
use super::types::{BoxFuture, ContentProvider, ProviderError};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEXT_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const PROFILE_SYSTEM_INSTRUCTION: &str = "\
You are a satirical generator for \"LooksMaxxing\" dating profiles. \
Use terminology like \"mogging\", \"mewing\", \"hunter eyes\", \"canthal tilt\", \
\"it's over\", \"we're so back\", \"looksmaxx\", \"chad\", \"stacy\", \"fwhr\", \
\"midface ratio\". Create exaggerated, humorous characters who are obsessed \
with their facial structure and stats.";

const PROFILE_PROMPT: &str =
    "Generate a funny, satirical LooksMaxx dating profile for a male or female character. \
     Respond with JSON: name, age, tagline, bio, stats {jawline, canthalTilt, mewingStreak, \
     height}, imagePrompt.";

const ANALYSIS_PROMPT: &str = "\
Analyze this face using the Looksmaxxing Forum scale (1-10). 1-3: It's Over, \
4: Below Avg, 5: Normie, 6: High Tier Normie, 7: Chadlite, 8: Chad, 9: Gigachad, \
10: God. Be brutally honest but funny. Provide specific scores (0-100) for \
Jawline, Eyes (Canthal Tilt), Skin, Symmetry. Respond with JSON: score, title, \
analysis, improvements, breakdown {jawline, eyes, skin, symmetry, phenotype}.";

const CHAT_APOLOGY: &str = "Can't talk, mewing hard right now (Server Busy).";

/// Profile fields as the text model returns them (no id or image yet).
#[derive(Debug, Deserialize)]
struct ProfileSeed {
    name: String,
    age: u8,
    tagline: String,
    bio: String,
    stats: ProfileStats,
    #[serde(rename = "imagePrompt")]
    image_prompt: String,
}

/// Generative provider over an injected HTTP client.
pub struct GeminiProvider<C: HttpClient> {
    http: C,
    api_key: String,
    fallback: OfflineProvider,
}

impl<C: HttpClient> GeminiProvider<C> {
    pub fn new(http: C, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            fallback: OfflineProvider::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent?key={}", API_BASE, model, self.api_key)
    }

    async fn request_profile_seed(&self) -> Result<ProfileSeed, ProviderError> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": PROFILE_SYSTEM_INSTRUCTION }] },
            "contents": [{ "parts": [{ "text": PROFILE_PROMPT }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });
        let response = self.http.post_json(&self.endpoint(TEXT_MODEL), &body).await?;
        let text = candidate_text(&response)?;
        serde_json::from_str(text)
            .map_err(|e| ProviderError::InvalidResponse(format!("bad profile JSON: {}", e)))
    }

    async fn request_card_image(&self, image_prompt: &str) -> Result<String, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": format!(
                "Hyper-realistic meme style, gigachad aesthetic, extremely defined features, {}",
                image_prompt
            ) }] }],
            "generationConfig": { "imageConfig": { "aspectRatio": "3:4" } },
        });
        let response = self
            .http
            .post_json(&self.endpoint(IMAGE_MODEL), &body)
            .await?;
        inline_image_data(&response)
            .map(|data| format!("data:image/png;base64,{}", data))
            .ok_or_else(|| ProviderError::InvalidResponse("no inline image data".to_string()))
    }
}

impl<C: HttpClient> ContentProvider for GeminiProvider<C> {
    fn generate_profile(&self) -> BoxFuture<'_, Result<Profile, ProviderError>> {
        Box::pin(async move {
            let seed = match self.request_profile_seed().await {
                Ok(seed) => seed,
                Err(e) => {
                    log_degraded("profile text generation", &e);
                    return self.fallback.generate_profile().await;
                }
            };

            let image_url = match self.request_card_image(&seed.image_prompt).await {
                Ok(url) => url,
                Err(e) => {
                    // Swallow and continue with a bundled image; image
                    // failure never fails the whole call.
                    log_degraded("profile image generation", &e);
                    random_placeholder_image()
                }
            };

            Ok(Profile {
                id: Uuid::new_v4(),
                name: seed.name,
                age: seed.age,
                tagline: seed.tagline,
                bio: seed.bio,
                stats: seed.stats,
                image_url,
                is_super_mog: false,
            })
        })
    }

    fn analyze_photo<'a>(&'a self, image_b64: &'a str) -> BoxFuture<'a, AnalysisResult> {
        Box::pin(async move {
            let body = json!({
                "contents": [{ "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": image_b64 } },
                    { "text": ANALYSIS_PROMPT },
                ] }],
                "generationConfig": { "responseMimeType": "application/json" },
            });

            let parsed: Result<AnalysisResult, ProviderError> = async {
                let response = self.http.post_json(&self.endpoint(TEXT_MODEL), &body).await?;
                let text = candidate_text(&response)?;
                serde_json::from_str(text)
                    .map_err(|e| ProviderError::InvalidResponse(format!("bad analysis JSON: {}", e)))
            }
            .await;

            match parsed {
                Ok(analysis) => analysis,
                Err(e) => {
                    log_degraded("photo analysis", &e);
                    AnalysisResult::quota_exceeded()
                }
            }
        })
    }

    fn chat_reply<'a>(
        &'a self,
        persona: &'a Profile,
        history: &'a [ChatMessage],
        new_message: &'a str,
    ) -> BoxFuture<'a, String> {
        Box::pin(async move {
            let mut contents: Vec<Value> = history
                .iter()
                .map(|message| {
                    json!({
                        "role": wire_role(message.role),
                        "parts": [{ "text": message.text }],
                    })
                })
                .collect();
            contents.push(json!({
                "role": "user",
                "parts": [{ "text": new_message }],
            }));

            let body = json!({
                "systemInstruction": { "parts": [{ "text": format!(
                    "Roleplay as {}. Obsessed with looksmaxxing/mewing. Be funny, slightly \
                     toxic, use slang (mogged, it's over). Keep it short.",
                    persona.name
                ) }] },
                "contents": contents,
            });

            let reply: Result<String, ProviderError> = async {
                let response = self.http.post_json(&self.endpoint(TEXT_MODEL), &body).await?;
                Ok(candidate_text(&response)?.to_string())
            }
            .await;

            match reply {
                Ok(text) => text,
                Err(e) => {
                    log_degraded("chat reply", &e);
                    CHAT_APOLOGY.to_string()
                }
            }
        })
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

/// First candidate's text part, the payload of every text response.
fn candidate_text(response: &Value) -> Result<&str, ProviderError> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse("missing candidate text".to_string()))
}

/// First inline image payload in an image-generation response.
fn inline_image_data(response: &Value) -> Option<&str> {
    response["candidates"][0]["content"]["parts"]
        .as_array()?
        .iter()
        .find_map(|part| part["inlineData"]["data"].as_str())
}

fn log_degraded(context: &str, error: &ProviderError) {
    match error {
        ProviderError::RateLimited => warn!(context, "quota exceeded, using fallback"),
        _ => error!(context, %error, "provider call failed, using fallback"),
    }
}
