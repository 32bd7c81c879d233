//! Pointer gesture tracking.
//!
//! This module converts a stream of raw pointer samples into a drag
//! offset and an instantaneous horizontal velocity estimate. It knows
//! nothing about cards, decisions, or rendering; the deck controller
//! consumes its numeric outputs.
//!
//! # Data flow
//!
//! ```text
//! raw pointer samples ──► PointerTracker ──► (offset, velocity)
//!                              │
//!                              └──► Haptics (one-shot threshold pulse)
//! ```
//!
//! All operations are synchronous transformations of in-memory state;
//! nothing here suspends.

mod tracker;
mod types;

pub use tracker::{
    PointerTracker, HAPTIC_PULSE_MS, HAPTIC_TRIGGER_DISTANCE, VELOCITY_SAMPLE_INTERVAL_MS,
};
pub use types::{DragState, GestureSample, Offset};
