//! Deck configuration.
//!
//! Plain structs with production constants as defaults. Individual
//! fields are tunable by embedders and tests; nothing is read from the
//! environment here.

use crate::deck::LOW_WATER_MARK;
use crate::swipe::SwipePolicy;

/// Items fetched sequentially before the deck is first shown: the
/// visible card plus one background card.
pub const INITIAL_BUFFER: usize = 2;

/// Top-level deck configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckConfig {
    /// Commit policy and exit trajectory parameters.
    pub swipe: SwipePolicy,
    /// Minimum unread run-ahead before a refill fetch is dispatched.
    pub low_water_mark: usize,
    /// Items to fetch (one at a time) during opening population.
    pub initial_buffer: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            swipe: SwipePolicy::default(),
            low_water_mark: LOW_WATER_MARK,
            initial_buffer: INITIAL_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_constants() {
        let config = DeckConfig::default();
        assert_eq!(config.low_water_mark, 3);
        assert_eq!(config.initial_buffer, 2);
        assert_eq!(config.swipe.swipe_threshold, 100.0);
    }
}
