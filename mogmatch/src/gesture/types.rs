//! Gesture data types.

use std::fmt;

/// A 2D displacement from the drag origin, in position units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// One raw pointer input event.
///
/// Ephemeral: produced per input event and consumed immediately by the
/// tracker, which retains at most the latest velocity sampling anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: u64,
}

impl GestureSample {
    pub fn new(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Live drag state. Exactly one instance exists per deck.
///
/// `offset` is only meaningful while `active` is true or during the
/// exit-animation window immediately after a commit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub origin_x: f32,
    pub origin_y: f32,
    pub offset: Offset,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_zero_is_default() {
        assert_eq!(Offset::default(), Offset::ZERO);
    }

    #[test]
    fn test_drag_state_starts_inactive() {
        let drag = DragState::default();
        assert!(!drag.active);
        assert_eq!(drag.offset, Offset::ZERO);
    }
}
