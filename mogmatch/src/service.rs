//! Async deck service: binds the synchronous deck core to a content
//! provider, timers, and the match list.
//!
//! # Architecture
//!
//! ```text
//! host input ──► DeckService ──► DeckController (sync core)
//!                    │                 │
//!                    │   FetchWanted   │
//!                    ├──► tokio::spawn(provider.generate_profile())
//!                    │                 │
//!                    └──◄ mpsc completion channel ◄┘
//! ```
//!
//! The service owns all mutable deck state and is driven from a single
//! task, so mutation is serialized exactly as the core expects. The only
//! suspension points are provider calls and exit-timer waits; the host
//! may keep feeding pointer events while a fetch is outstanding.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::DeckConfig;
use crate::deck::{DeckBuffer, DeckController, DeckEvent, DeckPhase};
use crate::gesture::{Offset, PointerTracker};
use crate::haptics::Haptics;
use crate::matches::MatchList;
use crate::profile::{AnalysisResult, Profile};
use crate::provider::{ContentProvider, ProviderError};
use crate::swipe::SwipeDirection;
use crate::viewport::Viewport;

type FetchResult = Result<Profile, ProviderError>;

/// Runs one deck against a content provider.
pub struct DeckService {
    controller: DeckController<Profile>,
    provider: Arc<dyn ContentProvider>,
    viewport: Arc<dyn Viewport>,
    matches: MatchList,
    fetch_tx: mpsc::UnboundedSender<FetchResult>,
    fetch_rx: mpsc::UnboundedReceiver<FetchResult>,
    events: VecDeque<DeckEvent<Profile>>,
    epoch: Instant,
    cancellation: CancellationToken,
    config: DeckConfig,
}

impl DeckService {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        viewport: Arc<dyn Viewport>,
        haptics: Arc<dyn Haptics>,
        config: DeckConfig,
    ) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let controller = DeckController::new(
            config.swipe,
            PointerTracker::with_haptics(haptics),
            DeckBuffer::with_low_water_mark(config.low_water_mark),
        );
        Self {
            controller,
            provider,
            viewport,
            matches: MatchList::new(),
            fetch_tx,
            fetch_rx,
            events: VecDeque::new(),
            epoch: Instant::now(),
            cancellation: CancellationToken::new(),
            config,
        }
    }

    /// Milliseconds since the service was created; the time base for all
    /// gesture timestamps and exit deadlines.
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Populate the opening "current + next" pair.
    ///
    /// Fetches are awaited one at a time, never concurrently; a failed
    /// fetch is logged by the buffer and the slot is simply tried again
    /// on the next opportunity.
    pub async fn open(&mut self) {
        for _ in 0..self.config.initial_buffer {
            if let Some(DeckEvent::FetchWanted) = self.controller.ensure_buffered() {
                let result = self.provider.generate_profile().await;
                self.controller.fetch_resolved(result);
            }
        }
        info!(buffered = self.controller.buffered(), "deck opened");
    }

    /// Forward a pointer-down event.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pump();
        let now = self.now_ms();
        self.controller.pointer_down(x, y, now);
    }

    /// Forward a pointer-move event.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pump();
        let now = self.now_ms();
        self.controller.pointer_move(x, y, now);
    }

    /// Release the drag. The viewport width is read here, at commit
    /// time, not cached from gesture start.
    pub fn pointer_up(&mut self) {
        self.pump();
        let width = self.viewport.width();
        let now = self.now_ms();
        let events = self.controller.pointer_up(width, now);
        self.absorb(events);
    }

    /// Button-triggered decision, same commit path as a drag.
    pub fn press(&mut self, direction: SwipeDirection) {
        self.pump();
        let width = self.viewport.width();
        let now = self.now_ms();
        let events = self.controller.press(direction, width, now);
        self.absorb(events);
    }

    /// Idempotent buffer check; hosts may call this every render.
    pub fn ensure_buffered(&mut self) {
        self.pump();
        if let Some(event) = self.controller.ensure_buffered() {
            self.absorb(vec![event]);
        }
    }

    /// Drive timers and fetches until the deck is at rest: no exit in
    /// flight and no fetch pending.
    pub async fn settle(&mut self) {
        let cancellation = self.cancellation.clone();
        loop {
            self.pump();

            let deadline = self.controller.exit_deadline_ms();
            if deadline.is_none() && !self.controller.is_fetch_pending() {
                return;
            }

            let wake_at = self.epoch + Duration::from_millis(deadline.unwrap_or(0));
            tokio::select! {
                _ = cancellation.cancelled() => return,
                _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                    let now = self.now_ms();
                    let events = self.controller.tick(now);
                    self.absorb(events);
                }
                maybe = self.fetch_rx.recv() => {
                    match maybe {
                        Some(result) => self.resolve(result),
                        None => return,
                    }
                }
            }
        }
    }

    /// Analyze a user photo (base64 image bytes). Never fails; degraded
    /// results come back as a valid sentinel.
    pub async fn analyze_photo(&self, image_b64: &str) -> AnalysisResult {
        self.provider.analyze_photo(image_b64).await
    }

    /// Send a chat message to a match.
    ///
    /// The user's message is appended optimistically before the reply is
    /// requested and is never rolled back. Returns the reply, or `None`
    /// if the match id is unknown.
    pub async fn send_chat(&mut self, match_id: uuid::Uuid, text: &str) -> Option<String> {
        let (persona, history) = {
            let entry = self.matches.get_mut(match_id)?;
            let history = entry.thread.messages().to_vec();
            let now = self.epoch.elapsed().as_millis() as u64;
            entry.push_user_message(text, now);
            (entry.profile.clone(), history)
        };

        let reply = self.provider.chat_reply(&persona, &history, text).await;

        let now = self.now_ms();
        if let Some(entry) = self.matches.get_mut(match_id) {
            entry.push_reply(reply.clone(), now);
        }
        Some(reply)
    }

    /// Deck events produced since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<DeckEvent<Profile>> {
        self.events.drain(..).collect()
    }

    pub fn matches(&self) -> &MatchList {
        &self.matches
    }

    pub fn phase(&self) -> DeckPhase {
        self.controller.phase()
    }

    pub fn cursor(&self) -> usize {
        self.controller.cursor()
    }

    pub fn buffered(&self) -> usize {
        self.controller.buffered()
    }

    pub fn current(&self) -> Option<&Profile> {
        self.controller.current()
    }

    pub fn next_up(&self) -> Option<&Profile> {
        self.controller.next_up()
    }

    pub fn display_offset(&self) -> Offset {
        self.controller.display_offset()
    }

    /// Token observed by spawned work; cancel to shut the deck down.
    /// Fetches resolving after cancellation are dropped harmlessly.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn shutdown(&self) {
        self.cancellation.cancel();
    }

    /// Apply any fetch completions that have already arrived.
    fn pump(&mut self) {
        while let Ok(result) = self.fetch_rx.try_recv() {
            self.resolve(result);
        }
    }

    fn resolve(&mut self, result: FetchResult) {
        self.controller.fetch_resolved(result);
        // Re-check after every resolution so the buffer keeps topping up
        // to the low-water mark.
        if let Some(event) = self.controller.ensure_buffered() {
            self.absorb(vec![event]);
        }
    }

    fn absorb(&mut self, events: Vec<DeckEvent<Profile>>) {
        for event in events {
            match &event {
                DeckEvent::Committed {
                    direction: SwipeDirection::Right,
                    item,
                    ..
                } => {
                    let now = self.now_ms();
                    if self.matches.record(item.clone(), now) {
                        info!(profile = %item.name, "it's a match");
                    }
                }
                DeckEvent::FetchWanted => self.spawn_fetch(),
                _ => {}
            }
            self.events.push_back(event);
        }
    }

    fn spawn_fetch(&self) {
        let provider = Arc::clone(&self.provider);
        let tx = self.fetch_tx.clone();
        let cancellation = self.cancellation.clone();
        debug!("dispatching profile fetch");
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancellation.cancelled() => return,
                result = provider.generate_profile() => result,
            };
            // Receiver may be gone after teardown; dropping the result
            // is harmless.
            let _ = tx.send(result);
        });
    }
}
