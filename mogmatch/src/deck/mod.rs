//! The deck: a cursor-addressed sequence of fetched items with a
//! look-ahead buffer and a gesture-driven state machine on top.
//!
//! # Architecture
//!
//! ```text
//! pointer events ──► DeckController ──► DeckEvent stream
//!                        │    │
//!        PointerTracker ─┘    └─► DeckBuffer ──► fetch directives
//! ```
//!
//! Both pieces are synchronous and runtime-free; the async glue that
//! binds fetch directives to a real content provider lives in
//! [`crate::service`].

mod buffer;
mod controller;

pub use buffer::{DeckBuffer, FetchDirective, LOW_WATER_MARK};
pub use controller::{DeckController, DeckEvent, DeckPhase};

use uuid::Uuid;

/// An item that can flow through the deck.
///
/// Items are opaque to the deck machinery apart from a stable identity
/// used for logging and match deduplication.
pub trait DeckItem {
    fn id(&self) -> Uuid;
}
