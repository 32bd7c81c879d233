//! Integration tests for the full deck flow.
//!
//! These tests verify the complete pipeline end to end:
//! - open → drag → commit → exit timer → advance → refill
//! - match recording and chat over the offline provider
//! - buffer health across a long swiping session
//!
//! Run with: `cargo test --test deck_flow`

use std::sync::Arc;
use std::time::Duration;

use mogmatch::config::DeckConfig;
use mogmatch::deck::{DeckEvent, DeckPhase};
use mogmatch::haptics::NoopHaptics;
use mogmatch::provider::OfflineProvider;
use mogmatch::service::DeckService;
use mogmatch::swipe::SwipeDirection;
use mogmatch::viewport::FixedViewport;

const VIEWPORT_WIDTH: f32 = 390.0;

fn offline_service() -> DeckService {
    DeckService::new(
        Arc::new(OfflineProvider::new()),
        Arc::new(FixedViewport::new(VIEWPORT_WIDTH)),
        Arc::new(NoopHaptics),
        DeckConfig::default(),
    )
}

/// Drive one committing drag: down at origin, two spaced moves well past
/// the positional threshold, release.
fn swipe_right(service: &mut DeckService) {
    service.pointer_down(0.0, 0.0);
    service.pointer_move(80.0, -4.0);
    service.pointer_move(160.0, -8.0);
    service.pointer_up();
}

#[tokio::test(start_paused = true)]
async fn test_open_then_swipe_session_keeps_buffer_healthy() {
    let mut service = offline_service();
    service.open().await;
    assert_eq!(service.buffered(), 2);

    // Swipe through ten cards; after every settle the deck must be idle
    // with the next card visible and no fetch dangling.
    for round in 1..=10 {
        assert!(service.current().is_some(), "no card at round {round}");
        swipe_right(&mut service);
        service.settle().await;

        assert_eq!(service.cursor(), round);
        assert_eq!(service.phase(), DeckPhase::Idle);
        assert!(service.current().is_some());
        assert!(!service.drain_events().is_empty());
    }

    // Run-ahead restored to the low-water mark.
    assert_eq!(service.buffered() - service.cursor(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_commit_event_precedes_advance_event() {
    let mut service = offline_service();
    service.open().await;

    swipe_right(&mut service);
    service.settle().await;

    let events = service.drain_events();
    let committed_at = events
        .iter()
        .position(|e| matches!(e, DeckEvent::Committed { .. }))
        .expect("no commit event");
    let advanced_at = events
        .iter()
        .position(|e| matches!(e, DeckEvent::Advanced { .. }))
        .expect("no advance event");
    assert!(committed_at < advanced_at);
}

#[tokio::test(start_paused = true)]
async fn test_right_swipes_accumulate_matches_newest_first() {
    let mut service = offline_service();
    service.open().await;

    let first = service.current().unwrap().clone();
    service.press(SwipeDirection::Right);
    service.settle().await;

    let second = service.current().unwrap().clone();
    service.press(SwipeDirection::Right);
    service.settle().await;

    let ids: Vec<_> = service.matches().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test(start_paused = true)]
async fn test_left_swipes_never_match() {
    let mut service = offline_service();
    service.open().await;

    for _ in 0..5 {
        service.press(SwipeDirection::Left);
        service.settle().await;
    }

    assert!(service.matches().is_empty());
    assert_eq!(service.cursor(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_snap_back_leaves_deck_unchanged() {
    let mut service = offline_service();
    service.open().await;
    let shown = service.current().unwrap().clone();

    // Short, slow drag: under both the distance and velocity thresholds.
    service.pointer_down(0.0, 0.0);
    service.pointer_move(40.0, 10.0);
    service.pointer_up();
    service.settle().await;

    let events = service.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], DeckEvent::SnappedBack));
    assert_eq!(service.current().unwrap().id, shown.id);
    assert_eq!(service.cursor(), 0);
    assert!(service.matches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_exit_target_clears_viewport() {
    let mut service = offline_service();
    service.open().await;

    swipe_right(&mut service);
    let events = service.drain_events();
    let exit = match &events[0] {
        DeckEvent::Committed { exit, .. } => *exit,
        other => panic!("expected commit, got {other:?}"),
    };

    assert!(exit.target.x >= VIEWPORT_WIDTH);
    assert_eq!(exit.target.x, VIEWPORT_WIDTH + 200.0);
    assert!((200..=500).contains(&(exit.duration_ms as i64)));

    // While exiting, the presentation offset is pinned to the target.
    assert_eq!(service.display_offset(), exit.target);
    service.settle().await;
    assert_eq!(service.display_offset().x, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_chat_round_trip_over_offline_provider() {
    let mut service = offline_service();
    service.open().await;

    service.press(SwipeDirection::Right);
    service.settle().await;
    let match_id = service.matches().iter().next().unwrap().id;

    let reply = service.send_chat(match_id, "do you even mew?").await;
    assert!(reply.is_some());

    let thread = &service.matches().get(match_id).unwrap().thread;
    assert_eq!(thread.messages().len(), 2);
    assert_eq!(thread.messages()[0].text, "do you even mew?");
    assert!(!thread.messages()[1].text.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_offline_provider_latency_does_not_block_gestures() {
    let mut service = DeckService::new(
        Arc::new(OfflineProvider::with_latency(Duration::from_millis(300))),
        Arc::new(FixedViewport::new(VIEWPORT_WIDTH)),
        Arc::new(NoopHaptics),
        DeckConfig::default(),
    );
    service.open().await;

    // A refill fetch is slower than the exit animation; the deck must
    // still advance on time and absorb the fetch when it lands.
    service.press(SwipeDirection::Right);
    service.settle().await;

    assert_eq!(service.cursor(), 1);
    assert_eq!(service.phase(), DeckPhase::Idle);
    assert!(!service.matches().is_empty());
}
