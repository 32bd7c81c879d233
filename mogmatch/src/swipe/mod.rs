//! Swipe decision policy and exit trajectory computation.
//!
//! Pure functions over numeric gesture state: no rendering, no timers.
//! The controller feeds in the frozen offset/velocity from a finished
//! drag and gets back a decision plus a physically-plausible exit plan
//! for the presentation layer to animate.

mod engine;

pub use engine::{
    ExitPlan, SwipeDecision, SwipeDirection, SwipePolicy, DEFAULT_EXIT_MS, EXIT_OVERSHOOT,
    MIN_EXIT_MS, MIN_FLING_DISTANCE, SWIPE_THRESHOLD, VELOCITY_CUTOFF,
};
