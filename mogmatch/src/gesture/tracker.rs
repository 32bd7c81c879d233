//! Continuous pointer tracking state machine.

use std::sync::Arc;

use crate::haptics::{Haptics, NoopHaptics};

use super::types::{DragState, GestureSample, Offset};

/// Minimum elapsed time between velocity recomputations.
///
/// Back-to-back pointer events inside the same animation frame produce
/// sub-frame jitter that dominates a naive delta estimate; sampling at
/// frame cadence keeps the estimate stable.
pub const VELOCITY_SAMPLE_INTERVAL_MS: u64 = 16;

/// Horizontal distance at which the haptic pulse fires.
///
/// Shares the value of [`crate::swipe::SWIPE_THRESHOLD`] but is a
/// deliberately independent constant: the haptic latch and the commit
/// policy are unrelated mechanisms.
pub const HAPTIC_TRIGGER_DISTANCE: f32 = 100.0;

/// Duration of the threshold-crossing pulse.
pub const HAPTIC_PULSE_MS: u32 = 10;

/// Converts raw pointer samples into an offset and a horizontal velocity
/// estimate.
///
/// # Contract
///
/// - [`start`](Self::start) begins tracking and resets the velocity
///   anchor and haptic latch. Ignored if a drag is already active.
/// - [`move_to`](Self::move_to) is a no-op unless tracking is active.
///   Velocity is recomputed at most once per
///   [`VELOCITY_SAMPLE_INTERVAL_MS`].
/// - [`end`](Self::end) freezes the last offset/velocity and is
///   idempotent.
///
/// # Haptic latch
///
/// When `|offset.x|` first exceeds [`HAPTIC_TRIGGER_DISTANCE`] during a
/// drag, a single pulse fires. The latch re-arms (silently) once the
/// offset drops back under the trigger distance, so a drag that wanders
/// across the line pulses once per upward crossing, never repeatedly
/// while held past it.
pub struct PointerTracker {
    haptics: Arc<dyn Haptics>,
    drag: DragState,
    /// Velocity sampling anchor: the last sample that contributed to the
    /// velocity estimate.
    anchor: Option<GestureSample>,
    /// Horizontal velocity in position units per millisecond.
    velocity: f32,
    haptic_latched: bool,
}

impl PointerTracker {
    /// Create a tracker with no haptic output.
    pub fn new() -> Self {
        Self::with_haptics(Arc::new(NoopHaptics))
    }

    /// Create a tracker that pulses the given sink on threshold crossings.
    pub fn with_haptics(haptics: Arc<dyn Haptics>) -> Self {
        Self {
            haptics,
            drag: DragState::default(),
            anchor: None,
            velocity: 0.0,
            haptic_latched: false,
        }
    }

    /// Begin tracking at `(x, y)`.
    pub fn start(&mut self, x: f32, y: f32, timestamp_ms: u64) {
        if self.drag.active {
            return;
        }
        self.drag = DragState {
            origin_x: x,
            origin_y: y,
            offset: Offset::ZERO,
            active: true,
        };
        self.anchor = Some(GestureSample::new(x, y, timestamp_ms));
        self.velocity = 0.0;
        self.haptic_latched = false;
    }

    /// Process a pointer move. No-op when not tracking.
    pub fn move_to(&mut self, x: f32, y: f32, timestamp_ms: u64) {
        if !self.drag.active {
            return;
        }

        self.drag.offset = Offset::new(x - self.drag.origin_x, y - self.drag.origin_y);

        if let Some(anchor) = self.anchor {
            let elapsed = timestamp_ms.saturating_sub(anchor.timestamp_ms);
            if elapsed >= VELOCITY_SAMPLE_INTERVAL_MS {
                self.velocity = (x - anchor.x) / elapsed as f32;
                self.anchor = Some(GestureSample::new(x, y, timestamp_ms));
            }
        }

        let past_trigger = self.drag.offset.x.abs() > HAPTIC_TRIGGER_DISTANCE;
        if past_trigger && !self.haptic_latched {
            self.haptics.pulse(HAPTIC_PULSE_MS);
            self.haptic_latched = true;
        } else if !past_trigger && self.haptic_latched {
            self.haptic_latched = false;
        }
    }

    /// Stop tracking, freezing the last offset and velocity.
    ///
    /// Safe to call when not tracking.
    pub fn end(&mut self) {
        self.drag.active = false;
    }

    /// Reset the frozen offset to zero (snap-back, or after a cursor
    /// advance clears the exit trajectory).
    pub fn reset_offset(&mut self) {
        self.drag.offset = Offset::ZERO;
    }

    /// Current drag offset relative to the origin.
    pub fn offset(&self) -> Offset {
        self.drag.offset
    }

    /// Latest horizontal velocity estimate in units/ms.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.drag.active
    }

    /// Snapshot of the full drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}
