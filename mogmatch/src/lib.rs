//! MogMatch - gesture-driven card deck engine
//!
//! This library provides the core functionality for a swipe-based profile
//! deck: pointer tracking, swipe decisions with physics-derived exit
//! trajectories, a look-ahead buffer fed by an async content provider,
//! and match/chat state.
//!
//! The deck core ([`deck`], [`gesture`], [`swipe`]) is synchronous and
//! runtime-free; [`service::DeckService`] binds it to a
//! [`provider::ContentProvider`] on tokio.

pub mod config;
pub mod deck;
pub mod gesture;
pub mod haptics;
pub mod log;
pub mod matches;
pub mod profile;
pub mod provider;
pub mod service;
pub mod swipe;
pub mod viewport;

pub use config::DeckConfig;
pub use deck::{DeckController, DeckEvent, DeckItem, DeckPhase};
pub use profile::{AnalysisResult, ChatMessage, Profile};
pub use provider::{ContentProvider, GeminiProvider, OfflineProvider, ProviderError};
pub use service::DeckService;
pub use swipe::{SwipeDecision, SwipeDirection};
