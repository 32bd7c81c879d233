//! Look-ahead item buffer with single-in-flight fetch dispatch.

use tracing::{debug, warn};

use crate::provider::ProviderError;

/// Minimum number of not-yet-seen items to keep buffered.
///
/// When the run-ahead drops below this, a refill fetch is dispatched.
pub const LOW_WATER_MARK: usize = 3;

/// What the caller should do after a buffer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDirective {
    /// Below the low-water mark and nothing in flight: issue exactly one
    /// fetch. The buffer has already marked it pending.
    Dispatch,
    /// A fetch is already in flight; do nothing.
    AwaitingFetch,
    /// Enough run-ahead is buffered; do nothing.
    Satisfied,
}

/// Ordered queue of fetched items with a consumption cursor.
///
/// Items are appended on fetch completion and never removed or mutated;
/// the cursor only moves forward. Memory growth is bounded by session
/// length, which is acceptable for this surface's lifetime.
///
/// # Invariants
///
/// - `cursor <= items.len()` at all times.
/// - At most one fetch is in flight: [`ensure_buffered`](Self::ensure_buffered)
///   returns [`FetchDirective::Dispatch`] only when no fetch is pending,
///   and marks one pending when it does.
#[derive(Debug)]
pub struct DeckBuffer<T> {
    items: Vec<T>,
    cursor: usize,
    pending_fetch: bool,
    low_water_mark: usize,
}

impl<T> DeckBuffer<T> {
    pub fn new() -> Self {
        Self::with_low_water_mark(LOW_WATER_MARK)
    }

    /// Buffer with a custom low-water mark (tests, tuning).
    pub fn with_low_water_mark(low_water_mark: usize) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            pending_fetch: false,
            low_water_mark,
        }
    }

    /// The currently-shown item, if any.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// The next (background) item, if any.
    pub fn next_up(&self) -> Option<&T> {
        self.items.get(self.cursor + 1)
    }

    /// Number of items fetched so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Items at or past the cursor (the unread run-ahead).
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.pending_fetch
    }

    /// Advance the cursor past the current item.
    ///
    /// No-op when there is no current item, preserving
    /// `cursor <= items.len()`.
    pub fn advance(&mut self) -> usize {
        if self.cursor < self.items.len() {
            self.cursor += 1;
        }
        self.cursor
    }

    /// Check the run-ahead and dispatch at most one refill fetch.
    ///
    /// Cheap and idempotent: safe to call on every cursor advance and
    /// every render. Returns [`FetchDirective::Dispatch`] at most once
    /// per in-flight window.
    pub fn ensure_buffered(&mut self) -> FetchDirective {
        if self.pending_fetch {
            return FetchDirective::AwaitingFetch;
        }
        if self.remaining() >= self.low_water_mark {
            return FetchDirective::Satisfied;
        }
        self.pending_fetch = true;
        debug!(
            remaining = self.remaining(),
            low_water_mark = self.low_water_mark,
            "buffer below low-water mark, dispatching fetch"
        );
        FetchDirective::Dispatch
    }

    /// Record the outcome of the in-flight fetch.
    ///
    /// Success appends the item; failure is logged and dropped; the
    /// next [`ensure_buffered`](Self::ensure_buffered) call retries, with
    /// no immediate re-dispatch to avoid hot-looping against a
    /// rate-limited provider. Late resolutions after the pending flag was
    /// already cleared are appended harmlessly.
    pub fn fetch_resolved(&mut self, result: Result<T, ProviderError>) {
        self.pending_fetch = false;
        match result {
            Ok(item) => {
                self.items.push(item);
                debug!(
                    buffered = self.len(),
                    cursor = self.cursor,
                    "fetch resolved, item appended"
                );
            }
            Err(error) => {
                warn!(%error, "item fetch failed; will retry on next buffer check");
            }
        }
    }
}

impl<T> Default for DeckBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_buffer() -> DeckBuffer<u32> {
        let mut buffer = DeckBuffer::new();
        for n in 0..4 {
            assert_eq!(buffer.ensure_buffered(), FetchDirective::Dispatch);
            buffer.fetch_resolved(Ok(n));
        }
        buffer
    }

    #[test]
    fn test_empty_buffer_dispatches_one_fetch() {
        let mut buffer: DeckBuffer<u32> = DeckBuffer::new();

        assert_eq!(buffer.ensure_buffered(), FetchDirective::Dispatch);
        // Second call before resolution must not dispatch again.
        assert_eq!(buffer.ensure_buffered(), FetchDirective::AwaitingFetch);
        assert!(buffer.is_fetch_pending());
    }

    #[test]
    fn test_resolution_appends_and_clears_pending() {
        let mut buffer = DeckBuffer::new();
        buffer.ensure_buffered();
        buffer.fetch_resolved(Ok(7));

        assert!(!buffer.is_fetch_pending());
        assert_eq!(buffer.current(), Some(&7));
        assert_eq!(buffer.remaining(), 1);
    }

    #[test]
    fn test_full_buffer_is_satisfied() {
        let mut buffer = full_buffer();
        assert_eq!(buffer.remaining(), 4);
        assert_eq!(buffer.ensure_buffered(), FetchDirective::Satisfied);
        assert!(!buffer.is_fetch_pending());
    }

    #[test]
    fn test_advance_drops_below_low_water_mark() {
        let mut buffer = full_buffer();
        buffer.advance();
        buffer.advance();

        // remaining == 2 < 3: refill wanted.
        assert_eq!(buffer.ensure_buffered(), FetchDirective::Dispatch);
    }

    #[test]
    fn test_failure_clears_pending_without_appending() {
        let mut buffer: DeckBuffer<u32> = DeckBuffer::new();
        buffer.ensure_buffered();
        buffer.fetch_resolved(Err(ProviderError::Http("503".to_string())));

        assert!(!buffer.is_fetch_pending());
        assert_eq!(buffer.len(), 0);
        // Next check retries.
        assert_eq!(buffer.ensure_buffered(), FetchDirective::Dispatch);
    }

    #[test]
    fn test_cursor_never_exceeds_len() {
        let mut buffer: DeckBuffer<u32> = DeckBuffer::new();
        buffer.advance();
        assert_eq!(buffer.cursor(), 0);

        buffer.ensure_buffered();
        buffer.fetch_resolved(Ok(1));
        buffer.advance();
        buffer.advance();
        assert_eq!(buffer.cursor(), 1);
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn test_current_and_next_track_cursor() {
        let mut buffer = full_buffer();
        assert_eq!(buffer.current(), Some(&0));
        assert_eq!(buffer.next_up(), Some(&1));

        buffer.advance();
        assert_eq!(buffer.current(), Some(&1));
        assert_eq!(buffer.next_up(), Some(&2));
    }

    #[test]
    fn test_late_resolution_append_is_harmless() {
        // A resolution arriving when nothing is marked pending (e.g. after
        // teardown races) still appends without disturbing the cursor.
        let mut buffer = full_buffer();
        buffer.fetch_resolved(Ok(99));
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.current(), Some(&0));
    }
}
