//! Conversation session - transcript bookkeeping around the matcher.
//!
//! A session has two states:
//! - **Idle**: no reply is owed
//! - **AwaitingReply**: one or more submitted messages still need a reply
//!
//! Front ends that show a typing delay use [`ConversationSession::submit`] and
//! later [`ConversationSession::resolve_next`]. Messages submitted while a
//! reply is pending are queued, and replies come back in submission order.
//! Headless callers use [`ConversationSession::send`], which replies at once.

mod transcript;

pub use transcript::*;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::matcher::MatchStrategy;

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the session is in the send/reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingReply,
}

/// One visitor conversation.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: SessionId,
    strategy: MatchStrategy,
    fallback: String,
    transcript: Vec<TranscriptEntry>,
    /// Messages submitted but not yet answered, oldest first.
    pending: VecDeque<String>,
}

impl ConversationSession {
    /// Create a session answering from `strategy`, replying with `fallback`
    /// when nothing matches.
    pub fn new(strategy: MatchStrategy, fallback: impl Into<String>) -> Self {
        let session = Self {
            id: SessionId::new(),
            strategy,
            fallback: fallback.into(),
            transcript: Vec::new(),
            pending: VecDeque::new(),
        };
        tracing::debug!(
            session = %session.id,
            strategy = %session.strategy.kind(),
            entries = session.strategy.len(),
            "Started conversation session"
        );
        session
    }

    /// Get the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the current state.
    pub fn state(&self) -> SessionState {
        if self.pending.is_empty() {
            SessionState::Idle
        } else {
            SessionState::AwaitingReply
        }
    }

    /// All entries so far, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Get the number of replies still owed.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Get the matching strategy.
    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }

    /// Get the reply used when nothing matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Compute the reply for a message without recording anything.
    pub fn reply_for(&self, message: &str) -> String {
        self.strategy
            .find(message)
            .answer_or(&self.fallback)
            .to_string()
    }

    /// Send a message and reply to it immediately.
    ///
    /// Returns `None` and records nothing when the message is blank. Any
    /// replies still pending from [`submit`](Self::submit) are delivered
    /// first so replies stay in request order.
    pub fn send(&mut self, message: &str) -> Option<Exchange> {
        if is_blank(message) {
            return None;
        }

        self.flush();

        let user = TranscriptEntry::user(message);
        let reply = TranscriptEntry::bot(self.reply_for(message));
        self.transcript.push(user.clone());
        self.transcript.push(reply.clone());

        Some(Exchange { user, reply })
    }

    /// Record a message and queue its reply.
    ///
    /// The user entry is appended right away; the reply is appended by
    /// [`resolve_next`](Self::resolve_next). Blank messages are ignored.
    pub fn submit(&mut self, message: &str) -> Option<TranscriptEntry> {
        if is_blank(message) {
            return None;
        }

        let user = TranscriptEntry::user(message);
        self.transcript.push(user.clone());
        self.pending.push_back(message.to_string());

        if self.pending.len() > 1 {
            tracing::debug!(
                session = %self.id,
                pending = self.pending.len(),
                "Queued message behind pending reply"
            );
        }
        Some(user)
    }

    /// Deliver the reply for the oldest pending message.
    pub fn resolve_next(&mut self) -> Option<TranscriptEntry> {
        let message = self.pending.pop_front()?;
        let reply = TranscriptEntry::bot(self.reply_for(&message));
        self.transcript.push(reply.clone());
        Some(reply)
    }

    /// Deliver every pending reply, oldest first.
    pub fn flush(&mut self) -> Vec<TranscriptEntry> {
        let mut replies = Vec::with_capacity(self.pending.len());
        while let Some(reply) = self.resolve_next() {
            replies.push(reply);
        }
        replies
    }
}

fn is_blank(message: &str) -> bool {
    message.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_kb::{KeywordTable, KnowledgeBase, KEYWORDS_FALLBACK, PAIRS_FALLBACK};

    fn pairs_session(pairs: &[(&str, &str)]) -> ConversationSession {
        let kb: KnowledgeBase = pairs.iter().copied().collect();
        ConversationSession::new(kb.into(), PAIRS_FALLBACK)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = pairs_session(&[("hello", "Hi there")]);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.transcript().is_empty());
        assert_eq!(session.fallback(), PAIRS_FALLBACK);
    }

    #[test]
    fn test_send_appends_user_then_bot() {
        let mut session = pairs_session(&[("what is llm", "LLM means...")]);

        let exchange = session.send("what is llm").unwrap();
        assert_eq!(exchange.user, TranscriptEntry::user("what is llm"));
        assert_eq!(exchange.reply, TranscriptEntry::bot("LLM means..."));

        assert_eq!(session.transcript(), &[exchange.user, exchange.reply]);
    }

    #[test]
    fn test_blank_messages_are_ignored() {
        let mut session = pairs_session(&[("hello", "Hi there")]);

        assert!(session.send("").is_none());
        assert!(session.send("   ").is_none());
        assert!(session.send("\t\n").is_none());
        assert!(session.submit(" ").is_none());

        assert!(session.transcript().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_user_text_is_kept_verbatim() {
        let mut session = pairs_session(&[("hello", "Hi there")]);

        let exchange = session.send("  hello  ").unwrap();
        assert_eq!(exchange.user.text, "  hello  ");
        assert_eq!(exchange.reply.text, "Hi there");
    }

    #[test]
    fn test_fallback_on_no_match() {
        let mut session = pairs_session(&[("hello", "Hi there")]);

        let exchange = session.send("Hello!!").unwrap();
        assert_eq!(exchange.reply.text, PAIRS_FALLBACK);
    }

    #[test]
    fn test_keyword_session() {
        let table: KeywordTable = [("hello", "Hi!")].into_iter().collect();
        let mut session = ConversationSession::new(table.into(), KEYWORDS_FALLBACK);

        assert_eq!(session.send("ohellos").unwrap().reply.text, "Hi!");
        assert_eq!(session.send("bye").unwrap().reply.text, KEYWORDS_FALLBACK);
    }

    #[test]
    fn test_empty_knowledge_always_falls_back() {
        let mut session = ConversationSession::new(KnowledgeBase::empty().into(), "nothing");
        assert_eq!(session.send("anything at all").unwrap().reply.text, "nothing");
    }

    #[test]
    fn test_each_send_adds_exactly_two_entries() {
        let mut session = pairs_session(&[("hi", "A"), ("hi there", "B")]);

        for (i, message) in ["hi", "hi there", "nope", "", "hi"].iter().enumerate() {
            let before = session.transcript().len();
            let sent = session.send(message).is_some();
            let added = session.transcript().len() - before;
            assert_eq!(added, if sent { 2 } else { 0 }, "message #{}", i);
        }

        let texts: Vec<_> = session.transcript().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["hi", "A", "hi there", "B", "nope", PAIRS_FALLBACK, "hi", "A"]
        );
    }

    #[test]
    fn test_bot_entries_come_from_knowledge_or_fallback() {
        let mut session = ConversationSession::new(
            portfolio_kb::portfolio_knowledge_base().into(),
            PAIRS_FALLBACK,
        );

        for message in [
            "hello",
            "tell me about umme",
            "what are your skills?",
            "random words here",
            "HOW can i reach you",
        ] {
            session.send(message);
        }

        for entry in session.transcript().iter().filter(|e| e.is_bot()) {
            assert!(
                session.strategy().knows_answer(&entry.text) || entry.text == session.fallback(),
                "unexpected reply: {}",
                entry.text
            );
        }
    }

    #[test]
    fn test_submit_and_resolve() {
        let mut session = pairs_session(&[("hello", "Hi there")]);

        let user = session.submit("hello").unwrap();
        assert!(user.from_user);
        assert_eq!(session.state(), SessionState::AwaitingReply);
        assert_eq!(session.transcript().len(), 1);

        let reply = session.resolve_next().unwrap();
        assert_eq!(reply.text, "Hi there");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.resolve_next().is_none());
    }

    #[test]
    fn test_queued_replies_keep_request_order() {
        let mut session = pairs_session(&[("hi", "A"), ("bye", "B")]);

        session.submit("hi");
        session.submit("bye");
        assert_eq!(session.pending_count(), 2);

        assert_eq!(session.resolve_next().unwrap().text, "A");
        assert_eq!(session.state(), SessionState::AwaitingReply);
        assert_eq!(session.resolve_next().unwrap().text, "B");
        assert_eq!(session.state(), SessionState::Idle);

        let texts: Vec<_> = session.transcript().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "bye", "A", "B"]);
    }

    #[test]
    fn test_send_flushes_pending_first() {
        let mut session = pairs_session(&[("hi", "A"), ("bye", "B")]);

        session.submit("hi");
        let exchange = session.send("bye").unwrap();
        assert_eq!(exchange.reply.text, "B");
        assert_eq!(session.state(), SessionState::Idle);

        let texts: Vec<_> = session.transcript().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "A", "bye", "B"]);
    }

    #[test]
    fn test_flush() {
        let mut session = pairs_session(&[("hi", "A")]);
        assert!(session.flush().is_empty());

        session.submit("hi");
        session.submit("what");
        let replies = session.flush();
        assert_eq!(
            replies,
            vec![TranscriptEntry::bot("A"), TranscriptEntry::bot(PAIRS_FALLBACK)]
        );
        assert_eq!(session.pending_count(), 0);
    }

    #[test]
    fn test_reply_for_does_not_record() {
        let session = pairs_session(&[("hi", "A")]);
        assert_eq!(session.reply_for("hi"), "A");
        assert_eq!(session.reply_for(""), PAIRS_FALLBACK);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = pairs_session(&[]);
        let b = pairs_session(&[]);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().to_string().len(), 36);
    }
}
