//! Conversation store
//!
//! Append-only history of turns. The only removal is of the last turn, used
//! to undo an optimistic user append when a send fails.

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered conversation history
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn. Blank text is ignored; returns whether a turn was added.
    pub fn append_user(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.turns.push(Turn::user(text));
        true
    }

    pub fn append_model(&mut self, text: &str) {
        self.turns.push(Turn::model(text));
    }

    /// Remove the most recent turn. No-op on an empty conversation.
    pub fn rollback_last(&mut self) -> Option<Turn> {
        self.turns.pop()
    }

    /// Owned copy of the history, independent of later mutation
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    #[allow(dead_code)] // API completeness
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
