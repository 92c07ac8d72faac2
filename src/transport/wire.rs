//! JSON shapes exchanged with the chat backend

use crate::conversation::{Role, Turn};
use serde::{Deserialize, Serialize};

/// Request body: `{"history": [{"role": ..., "parts": [{"text": ...}]}]}`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub history: Vec<HistoryEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry<'a> {
    pub role: Role,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn from_turns(turns: &'a [Turn]) -> Self {
        Self {
            history: turns
                .iter()
                .map(|turn| HistoryEntry {
                    role: turn.role(),
                    parts: vec![Part { text: turn.text() }],
                })
                .collect(),
        }
    }
}

/// Success body
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Error body on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
