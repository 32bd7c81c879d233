//! Match list and chat threads.
//!
//! A committed Right swipe records a match; each match carries a chat
//! thread. Message sending follows optimistic-append semantics: the
//! user's message is appended synchronously before the async reply is
//! requested, and it is never rolled back; on failure the provider
//! substitutes an apology line, so the thread only ever grows
//! (at-least-once, no-rollback).

use uuid::Uuid;

use crate::profile::{ChatMessage, Profile};

/// Opening status line shown before any messages exist.
const MATCH_OPENER: &str = "MOG BATTLE INITIATED";

/// Append-only message log for one match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append the user's outgoing message. Called before the reply is
    /// requested; stays in place regardless of what happens next.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    /// Append the persona's reply.
    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::model(text));
    }
}

/// One matched profile with its conversation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMatch {
    pub id: Uuid,
    pub profile: Profile,
    pub thread: ChatThread,
    /// Preview line for list display: the most recent message text.
    pub last_message: String,
    pub updated_at_ms: u64,
}

impl ChatMatch {
    fn new(profile: Profile, now_ms: u64) -> Self {
        Self {
            id: profile.id,
            profile,
            thread: ChatThread::new(),
            last_message: MATCH_OPENER.to_string(),
            updated_at_ms: now_ms,
        }
    }

    /// Optimistically append the user's message.
    pub fn push_user_message(&mut self, text: impl Into<String>, now_ms: u64) {
        let text = text.into();
        self.thread.push_user(text.clone());
        self.last_message = text;
        self.updated_at_ms = now_ms;
    }

    /// Append the confirmed reply.
    pub fn push_reply(&mut self, text: impl Into<String>, now_ms: u64) {
        let text = text.into();
        self.thread.push_reply(text.clone());
        self.last_message = text;
        self.updated_at_ms = now_ms;
    }
}

/// Newest-first list of matches, deduplicated by profile id.
#[derive(Debug, Clone, Default)]
pub struct MatchList {
    matches: Vec<ChatMatch>,
}

impl MatchList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match. Returns `false` (and changes nothing) if this
    /// profile is already matched.
    pub fn record(&mut self, profile: Profile, now_ms: u64) -> bool {
        if self.matches.iter().any(|m| m.id == profile.id) {
            return false;
        }
        self.matches.insert(0, ChatMatch::new(profile, now_ms));
        true
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ChatMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Matches, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
