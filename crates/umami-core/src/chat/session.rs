//! Client-held chat session state.
//!
//! `ChatSession` is the single container for everything the chat UI shows:
//! the transcript, the history sent with each request, the answer being
//! streamed, and the example prompts. It is only changed through the
//! transition methods below, so the pending buffer and the transcript can
//! never disagree.

use umami_types::chat::{HistoryPair, Turn, TurnRole};
use umami_types::error::SessionError;
use umami_types::locale::Locale;

use crate::locale;

/// The in-progress assistant answer for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnswer {
    question: String,
    buffer: String,
}

impl PendingAnswer {
    /// The user question this answer responds to.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Text received so far.
    pub fn text(&self) -> &str {
        &self.buffer
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<Turn>,
    history: Vec<HistoryPair>,
    pending: Option<PendingAnswer>,
    suggestions: Vec<String>,
}

impl ChatSession {
    /// Start a session seeded with one assistant greeting turn.
    pub fn new(greeting: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            transcript: vec![Turn::assistant(greeting)],
            history: Vec::new(),
            pending: None,
            suggestions,
        }
    }

    /// Start a session with the localized greeting and example prompts.
    pub fn for_restaurant(restaurant_name: &str, locale: Locale) -> Self {
        Self::new(
            locale::greeting(restaurant_name, locale),
            locale::example_messages(locale),
        )
    }

    /// Append a user turn. Suggestions no longer apply once the user has
    /// asked something.
    pub fn append_user_turn(&mut self, text: impl Into<String>) {
        self.transcript.push(Turn::user(text));
        self.suggestions.clear();
    }

    /// Open an empty answer buffer for the latest user turn.
    pub fn begin_pending(&mut self) -> Result<(), SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::PendingAlreadyOpen);
        }
        self.pending = Some(PendingAnswer {
            question: self.last_user_text().unwrap_or_default().to_string(),
            buffer: String::new(),
        });
        Ok(())
    }

    /// Append a fragment to the open buffer. No-op when none is open.
    pub fn append_pending_fragment(&mut self, text: &str) {
        if let Some(pending) = self.pending.as_mut() {
            pending.buffer.push_str(text);
        }
    }

    /// Close the buffer into an assistant turn and a history pair.
    /// Returns the committed answer text.
    pub fn commit_pending(&mut self) -> Result<String, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NoPendingAnswer)?;
        self.transcript.push(Turn::assistant(pending.buffer.clone()));
        self.history
            .push(HistoryPair::new(pending.question, pending.buffer.clone()));
        Ok(pending.buffer)
    }

    /// Close the buffer without committing anything. Returns the discarded
    /// partial answer, if a buffer was open.
    pub fn abort_pending(&mut self) -> Option<PendingAnswer> {
        self.pending.take()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn history(&self) -> &[HistoryPair] {
        &self.history
    }

    pub fn pending(&self) -> Option<&PendingAnswer> {
        self.pending.as_ref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn last_user_text(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|turn| turn.role == TurnRole::User)
            .map(|turn| turn.text.as_str())
    }
}
