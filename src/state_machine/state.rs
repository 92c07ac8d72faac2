//! Chat cycle states

/// Where the widget is in the send cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    /// Accepting input
    #[default]
    Idle,
    /// One request in flight; further submissions are rejected
    Sending,
}

impl ChatState {
    pub fn is_sending(self) -> bool {
        matches!(self, ChatState::Sending)
    }

    pub fn label(self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::Sending => "sending",
        }
    }
}
