//! Transcript entries shown in the chat window.

use serde::{Deserialize, Serialize};

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,

    /// `true` for visitor messages, `false` for bot replies.
    pub from_user: bool,
}

impl TranscriptEntry {
    /// Create a visitor entry.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_user: true,
        }
    }

    /// Create a bot entry.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_user: false,
        }
    }

    /// Check if this entry is a bot reply.
    pub fn is_bot(&self) -> bool {
        !self.from_user
    }
}

/// A visitor message and the reply it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: TranscriptEntry,
    pub reply: TranscriptEntry,
}
