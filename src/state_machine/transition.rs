//! Pure state transition function

use super::{ChatState, Effect, Event};
use crate::conversation::Turn;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A reply is still pending, cannot accept another message")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs. The snapshot
/// for `RequestReply` is taken by the executor after `AppendUser` has run,
/// so it always includes the optimistic user turn.
pub fn transition(state: ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Submission
        // ============================================================

        // Blank input is not an error, just nothing to do
        (ChatState::Idle, Event::Submit { text }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(ChatState::Idle))
        }

        // Idle + Submit -> Sending
        (ChatState::Idle, Event::Submit { text }) => {
            let text = text.trim().to_string();
            Ok(TransitionResult::new(ChatState::Sending)
                .with_effect(Effect::ClearInput)
                .with_effect(Effect::AppendUser { text: text.clone() })
                .with_effect(Effect::RenderTurn {
                    turn: Turn::user(text),
                })
                .with_effect(Effect::ShowTyping)
                .with_effect(Effect::RequestReply))
        }

        (ChatState::Sending, Event::Submit { .. }) => Err(TransitionError::Busy),

        // ============================================================
        // Outcome of the in-flight request
        // ============================================================

        // Sending + ReplyReceived -> Idle
        (ChatState::Sending, Event::ReplyReceived { text }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::HideTyping)
                .with_effect(Effect::RenderTurn {
                    turn: Turn::model(text.clone()),
                })
                .with_effect(Effect::AppendModel { text }))
        }

        // Sending + SendFailed -> Idle, every failure kind rolls back alike
        (ChatState::Sending, Event::SendFailed { failure }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::HideTyping)
                .with_effect(Effect::RenderError {
                    message: failure.to_string(),
                })
                .with_effect(Effect::RollbackLast))
        }

        (ChatState::Idle, event @ (Event::ReplyReceived { .. } | Event::SendFailed { .. })) => {
            Err(TransitionError::InvalidTransition(format!(
                "{event:?} with no request in flight"
            )))
        }
    }
}
