//! Deck state machine: gesture lifecycle to committed decisions.

use tracing::debug;

use crate::gesture::{Offset, PointerTracker};
use crate::swipe::{ExitPlan, SwipeDecision, SwipeDirection, SwipePolicy};

use super::buffer::{DeckBuffer, FetchDirective};
use super::DeckItem;

/// Lifecycle phase of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    /// No gesture in progress; showing the current item at rest.
    Idle,
    /// A drag is being tracked.
    Dragging,
    /// A decision committed; the exit animation is in flight and input
    /// is ignored until the timer elapses.
    Exiting,
}

/// Observable outcome of a controller call.
///
/// Events are returned in order from the call that produced them, so a
/// `Committed` event reaches the consumer synchronously, before the
/// deferred cursor advance that follows the exit animation.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent<T> {
    /// A decision was committed on `item`. Emitted while the cursor still
    /// points at the item; the advance happens on timer elapse.
    Committed {
        direction: SwipeDirection,
        item: T,
        exit: ExitPlan,
    },
    /// The drag ended below thresholds and the card returned to rest.
    SnappedBack,
    /// The exit timer elapsed and the cursor moved forward.
    Advanced { cursor: usize },
    /// The buffer dropped below its low-water mark; the owner should
    /// issue exactly one fetch and feed the result back through
    /// [`DeckController::fetch_resolved`].
    FetchWanted,
}

struct ExitInFlight {
    plan: ExitPlan,
    deadline_ms: u64,
}

/// Orchestrates [`PointerTracker`], the swipe policy, and [`DeckBuffer`]
/// into the observable deck behavior.
///
/// Purely synchronous: callers feed it pointer events, timer ticks, and
/// fetch resolutions; it returns [`DeckEvent`]s. See [`crate::service`]
/// for the async binding.
pub struct DeckController<T> {
    policy: SwipePolicy,
    tracker: PointerTracker,
    buffer: DeckBuffer<T>,
    phase: DeckPhase,
    exit: Option<ExitInFlight>,
}

impl<T: DeckItem + Clone> DeckController<T> {
    pub fn new(policy: SwipePolicy, tracker: PointerTracker, buffer: DeckBuffer<T>) -> Self {
        Self {
            policy,
            tracker,
            buffer,
            phase: DeckPhase::Idle,
            exit: None,
        }
    }

    /// Begin a drag at `(x, y)`.
    ///
    /// Ignored while a card is mid-exit (re-entrant drags on a card in
    /// flight are not allowed) and when there is nothing to drag.
    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: u64) {
        if self.phase == DeckPhase::Exiting {
            return;
        }
        if self.buffer.current().is_none() {
            return;
        }
        self.tracker.start(x, y, now_ms);
        if self.tracker.is_active() {
            self.phase = DeckPhase::Dragging;
        }
    }

    /// Feed a pointer move sample into the tracker.
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: u64) {
        if self.phase != DeckPhase::Dragging {
            return;
        }
        self.tracker.move_to(x, y, now_ms);
    }

    /// Release the drag and decide.
    ///
    /// `viewport_width` is the host's width *right now*; it is consumed
    /// at commit time because orientation/resize can change it between
    /// gesture start and end. Idempotent: a second release without an
    /// intervening press is a no-op.
    pub fn pointer_up(&mut self, viewport_width: f32, now_ms: u64) -> Vec<DeckEvent<T>> {
        if self.phase != DeckPhase::Dragging {
            return Vec::new();
        }
        self.tracker.end();

        let offset = self.tracker.offset();
        let velocity = self.tracker.velocity();
        match self.policy.decide(offset, velocity) {
            SwipeDecision::SnapBack => {
                self.tracker.reset_offset();
                self.phase = DeckPhase::Idle;
                debug!(?offset, velocity, "drag released below thresholds, snapping back");
                vec![DeckEvent::SnappedBack]
            }
            SwipeDecision::Commit(direction) => {
                self.commit(direction, offset, velocity, viewport_width, now_ms)
            }
        }
    }

    /// Button-triggered decision, bypassing the drag.
    ///
    /// Routes through the same commit path with a synthetic zero offset,
    /// so the trajectory degenerates to a straight off-screen exit.
    /// Ignored unless the deck is idle.
    pub fn press(
        &mut self,
        direction: SwipeDirection,
        viewport_width: f32,
        now_ms: u64,
    ) -> Vec<DeckEvent<T>> {
        if self.phase != DeckPhase::Idle {
            return Vec::new();
        }
        self.commit(direction, Offset::ZERO, 0.0, viewport_width, now_ms)
    }

    fn commit(
        &mut self,
        direction: SwipeDirection,
        offset: Offset,
        velocity: f32,
        viewport_width: f32,
        now_ms: u64,
    ) -> Vec<DeckEvent<T>> {
        // Nothing to decide about: reject silently.
        let Some(item) = self.buffer.current().cloned() else {
            self.phase = DeckPhase::Idle;
            return Vec::new();
        };

        let plan = self
            .policy
            .compute_exit(SwipeDecision::Commit(direction), offset, velocity, viewport_width);
        self.phase = DeckPhase::Exiting;
        self.exit = Some(ExitInFlight {
            plan,
            deadline_ms: now_ms + plan.duration_ms,
        });
        debug!(
            %direction,
            item = %item.id(),
            duration_ms = plan.duration_ms,
            "swipe committed, exit in flight"
        );
        vec![DeckEvent::Committed {
            direction,
            item,
            exit: plan,
        }]
    }

    /// Clock tick. When the exit timer elapses: the cursor advances, the
    /// drag offset resets, and the buffer is topped up.
    pub fn tick(&mut self, now_ms: u64) -> Vec<DeckEvent<T>> {
        let elapsed = matches!(
            (&self.phase, &self.exit),
            (DeckPhase::Exiting, Some(exit)) if now_ms >= exit.deadline_ms
        );
        if !elapsed {
            return Vec::new();
        }

        let cursor = self.buffer.advance();
        self.tracker.reset_offset();
        self.phase = DeckPhase::Idle;
        self.exit = None;
        debug!(cursor, "exit animation finished, cursor advanced");

        let mut events = vec![DeckEvent::Advanced { cursor }];
        if let Some(event) = self.ensure_buffered() {
            events.push(event);
        }
        events
    }

    /// Cheap idempotent buffer check; yields at most one
    /// [`DeckEvent::FetchWanted`] per in-flight fetch window.
    pub fn ensure_buffered(&mut self) -> Option<DeckEvent<T>> {
        match self.buffer.ensure_buffered() {
            FetchDirective::Dispatch => Some(DeckEvent::FetchWanted),
            FetchDirective::AwaitingFetch | FetchDirective::Satisfied => None,
        }
    }

    /// Feed back the outcome of the in-flight fetch.
    pub fn fetch_resolved(&mut self, result: Result<T, crate::provider::ProviderError>) {
        self.buffer.fetch_resolved(result);
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&T> {
        self.buffer.current()
    }

    pub fn next_up(&self) -> Option<&T> {
        self.buffer.next_up()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Number of items fetched so far.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.buffer.is_fetch_pending()
    }

    /// Offset the presentation layer should render the top card at:
    /// the live drag offset while dragging, the exit target while a
    /// committed card is in flight, zero at rest.
    pub fn display_offset(&self) -> Offset {
        match (&self.phase, &self.exit) {
            (DeckPhase::Exiting, Some(exit)) => exit.plan.target,
            _ => self.tracker.offset(),
        }
    }

    /// Absolute deadline of the in-flight exit animation, if any.
    pub fn exit_deadline_ms(&self) -> Option<u64> {
        self.exit.as_ref().map(|exit| exit.deadline_ms)
    }
}
