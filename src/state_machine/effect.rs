//! Effects produced by state transitions

use crate::conversation::Turn;

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Empty the input field
    ClearInput,

    /// Optimistically append the user's turn
    AppendUser { text: String },
    /// Record the model's reply
    AppendModel { text: String },
    /// Undo the optimistic user turn
    RollbackLast,

    /// Add a turn to the message panel
    RenderTurn { turn: Turn },
    /// Add an error entry to the message panel
    RenderError { message: String },
    ShowTyping,
    HideTyping,

    /// Send a snapshot of the conversation to the transport
    RequestReply,
}
