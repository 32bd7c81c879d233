//! Threshold/velocity commit policy and exit trajectory math.

use crate::gesture::Offset;

/// Horizontal distance past which a release always commits.
pub const SWIPE_THRESHOLD: f32 = 100.0;

/// Velocity (units/ms) past which a fling can commit early.
pub const VELOCITY_CUTOFF: f32 = 0.8;

/// Minimum distance a fling must cover to commit.
///
/// A fast flick that barely moved is treated as noise, not intent.
pub const MIN_FLING_DISTANCE: f32 = 30.0;

/// How far past the viewport edge the exit trajectory lands.
pub const EXIT_OVERSHOOT: f32 = 200.0;

/// Exit/snap-back duration when velocity is unknown or zero.
pub const DEFAULT_EXIT_MS: u64 = 400;

/// Duration floor so fast exits stay visually legible.
pub const MIN_EXIT_MS: u64 = 200;

/// Committed swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of the horizontal exit direction: -1.0 left, +1.0 right.
    pub fn sign(&self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeDirection::Left => write!(f, "left"),
            SwipeDirection::Right => write!(f, "right"),
        }
    }
}

/// Outcome of releasing a drag. Produced exactly once per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Commit toward the given edge; the cursor will advance.
    Commit(SwipeDirection),
    /// Below thresholds: the card returns to rest.
    SnapBack,
}

impl SwipeDecision {
    pub fn is_commit(&self) -> bool {
        matches!(self, SwipeDecision::Commit(_))
    }

    /// Committed direction, if any.
    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            SwipeDecision::Commit(direction) => Some(*direction),
            SwipeDecision::SnapBack => None,
        }
    }
}

/// Target offset and duration for the post-release animation.
///
/// For commits the target is off-screen past the viewport edge; for
/// snap-backs it is the resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitPlan {
    pub target: Offset,
    pub duration_ms: u64,
}

/// Commit policy and trajectory parameters.
///
/// Defaults are the production constants; tests and embedders can tune
/// individual fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipePolicy {
    pub swipe_threshold: f32,
    pub velocity_cutoff: f32,
    pub min_fling_distance: f32,
    pub exit_overshoot: f32,
    pub default_exit_ms: u64,
    pub min_exit_ms: u64,
}

impl Default for SwipePolicy {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
            velocity_cutoff: VELOCITY_CUTOFF,
            min_fling_distance: MIN_FLING_DISTANCE,
            exit_overshoot: EXIT_OVERSHOOT,
            default_exit_ms: DEFAULT_EXIT_MS,
            min_exit_ms: MIN_EXIT_MS,
        }
    }
}

impl SwipePolicy {
    /// Decide commit vs. snap-back for a released drag.
    ///
    /// Commits when the drag traveled past the threshold, or when it was
    /// a fling: fast past the cutoff *and* at least the minimum fling
    /// distance. A zero horizontal offset always snaps back.
    pub fn decide(&self, offset: Offset, velocity: f32) -> SwipeDecision {
        let passed_threshold = offset.x.abs() > self.swipe_threshold;
        let flung =
            velocity.abs() > self.velocity_cutoff && offset.x.abs() > self.min_fling_distance;

        if passed_threshold || flung {
            if offset.x > 0.0 {
                SwipeDecision::Commit(SwipeDirection::Right)
            } else {
                SwipeDecision::Commit(SwipeDirection::Left)
            }
        } else {
            SwipeDecision::SnapBack
        }
    }

    /// Compute the exit (or snap-back) trajectory for a decision.
    ///
    /// Committed exits land at `±(viewport_width + overshoot)`
    /// horizontally; the vertical target extrapolates the drag's existing
    /// slope so the card keeps flying along its apparent path instead of
    /// snapping to a new angle. Duration shrinks with speed, floored at
    /// [`MIN_EXIT_MS`]; with no velocity data it is exactly
    /// [`DEFAULT_EXIT_MS`].
    pub fn compute_exit(
        &self,
        decision: SwipeDecision,
        offset: Offset,
        velocity: f32,
        viewport_width: f32,
    ) -> ExitPlan {
        let direction = match decision.direction() {
            Some(direction) => direction,
            None => {
                return ExitPlan {
                    target: Offset::ZERO,
                    duration_ms: self.default_exit_ms,
                }
            }
        };

        let target_x = direction.sign() * (viewport_width + self.exit_overshoot);
        let slope = if offset.x != 0.0 {
            offset.y / offset.x
        } else {
            0.0
        };
        let target_y = offset.y + slope * (target_x - offset.x).abs();

        let speed = velocity.abs();
        let duration_ms = if speed > 0.0 {
            (500.0 - speed * 150.0).max(self.min_exit_ms as f32) as u64
        } else {
            self.default_exit_ms
        };

        ExitPlan {
            target: Offset::new(target_x, target_y),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> SwipePolicy {
        SwipePolicy::default()
    }

    #[test]
    fn test_slow_short_drag_snaps_back() {
        // Anything within the threshold at sub-cutoff speed is a snap-back.
        for x in [-100.0, -60.0, 0.0, 55.0, 100.0] {
            let decision = policy().decide(Offset::new(x, 10.0), 0.5);
            assert_eq!(decision, SwipeDecision::SnapBack, "offset.x = {x}");
        }
    }

    #[test]
    fn test_past_threshold_commits_by_sign() {
        assert_eq!(
            policy().decide(Offset::new(101.0, 0.0), 0.0),
            SwipeDecision::Commit(SwipeDirection::Right)
        );
        assert_eq!(
            policy().decide(Offset::new(-101.0, 0.0), 0.0),
            SwipeDecision::Commit(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_fling_commits_past_distance_floor() {
        // Fast flick past the minimum distance commits...
        assert_eq!(
            policy().decide(Offset::new(40.0, 0.0), 1.2),
            SwipeDecision::Commit(SwipeDirection::Right)
        );
        // ...but a fast flick that barely moved does not.
        assert_eq!(
            policy().decide(Offset::new(10.0, 0.0), 1.2),
            SwipeDecision::SnapBack
        );
    }

    #[test]
    fn test_leftward_fling_commits_left() {
        assert_eq!(
            policy().decide(Offset::new(-40.0, 0.0), -1.2),
            SwipeDecision::Commit(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_exit_lands_past_viewport_edge() {
        let plan = policy().compute_exit(
            SwipeDecision::Commit(SwipeDirection::Right),
            Offset::new(120.0, 0.0),
            0.0,
            390.0,
        );
        assert_eq!(plan.target.x, 590.0);

        let plan = policy().compute_exit(
            SwipeDecision::Commit(SwipeDirection::Left),
            Offset::new(-120.0, 0.0),
            0.0,
            390.0,
        );
        assert_eq!(plan.target.x, -590.0);
    }

    #[test]
    fn test_exit_extrapolates_drag_slope() {
        // Drag at 45° down-right keeps descending along the same slope.
        let plan = policy().compute_exit(
            SwipeDecision::Commit(SwipeDirection::Right),
            Offset::new(120.0, 120.0),
            0.0,
            390.0,
        );
        assert_eq!(plan.target.y, 120.0 + 1.0 * (590.0 - 120.0));
    }

    #[test]
    fn test_exit_with_zero_offset_goes_straight() {
        // Button-triggered commits use a synthetic zero offset; the slope
        // degenerates and the card flies straight off-screen.
        let plan = policy().compute_exit(
            SwipeDecision::Commit(SwipeDirection::Left),
            Offset::ZERO,
            0.0,
            390.0,
        );
        assert_eq!(plan.target, Offset::new(-590.0, 0.0));
        assert_eq!(plan.duration_ms, DEFAULT_EXIT_MS);
    }

    #[test]
    fn test_exit_duration_with_unknown_velocity_is_default() {
        let plan = policy().compute_exit(
            SwipeDecision::Commit(SwipeDirection::Right),
            Offset::new(150.0, 0.0),
            0.0,
            390.0,
        );
        assert_eq!(plan.duration_ms, DEFAULT_EXIT_MS);
    }

    #[test]
    fn test_exit_duration_shrinks_with_speed_and_floors() {
        let exit = |velocity: f32| {
            policy()
                .compute_exit(
                    SwipeDecision::Commit(SwipeDirection::Right),
                    Offset::new(150.0, 0.0),
                    velocity,
                    390.0,
                )
                .duration_ms
        };

        assert_eq!(exit(1.0), 350);
        assert_eq!(exit(2.0), MIN_EXIT_MS);
        // Well past the floor stays floored.
        assert_eq!(exit(10.0), MIN_EXIT_MS);
    }

    #[test]
    fn test_snap_back_plan_returns_to_rest() {
        let plan =
            policy().compute_exit(SwipeDecision::SnapBack, Offset::new(40.0, 20.0), 0.3, 390.0);
        assert_eq!(plan.target, Offset::ZERO);
        assert_eq!(plan.duration_ms, DEFAULT_EXIT_MS);
    }

    proptest! {
        /// Duration is monotonically non-increasing in |velocity| over the
        /// measured-velocity branch (zero velocity takes the fixed-default
        /// branch instead).
        #[test]
        fn test_exit_duration_monotone_in_speed(a in 0.01f32..5.0, b in 0.01f32..5.0) {
            let (slow, fast) = if a.abs() <= b.abs() { (a, b) } else { (b, a) };
            let duration = |velocity: f32| {
                policy()
                    .compute_exit(
                        SwipeDecision::Commit(SwipeDirection::Right),
                        Offset::new(150.0, 0.0),
                        velocity,
                        390.0,
                    )
                    .duration_ms
            };
            prop_assert!(duration(fast) <= duration(slow));
            prop_assert!(duration(fast) >= MIN_EXIT_MS);
        }
    }
}
