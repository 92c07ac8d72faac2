//! Message panel model
//!
//! The rendered view of the conversation. Entries are derived from turns and
//! errors and never read back into the conversation store.

use crate::conversation::{Role, Turn};
use chrono::{DateTime, Local};

/// Prefix that sets error entries apart from turns
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Model,
    Error,
    Typing,
}

/// One rendered entry
#[derive(Debug, Clone)]
pub struct UiMessage {
    pub kind: MessageKind,
    pub text: String,
    pub at: DateTime<Local>,
}

impl UiMessage {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            at: Local::now(),
        }
    }

    /// Text as displayed, including the error prefix
    pub fn display_text(&self) -> String {
        match self.kind {
            MessageKind::Error => format!("{ERROR_PREFIX}{}", self.text),
            _ => self.text.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MessagePanel {
    messages: Vec<UiMessage>,
    /// The single transient "typing" entry, always rendered last
    typing: Option<UiMessage>,
    /// Lines scrolled up from the bottom; 0 follows new output
    scroll_back: u16,
}

impl MessagePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_turn(&mut self, turn: &Turn) {
        let kind = match turn.role() {
            Role::User => MessageKind::User,
            Role::Model => MessageKind::Model,
        };
        self.push(UiMessage::new(kind, turn.text()));
    }

    pub fn push_error(&mut self, message: &str) {
        self.push(UiMessage::new(MessageKind::Error, message));
    }

    pub fn show_typing(&mut self) {
        self.typing = Some(UiMessage::new(MessageKind::Typing, "typing..."));
        self.scroll_to_bottom();
    }

    pub fn hide_typing(&mut self) {
        self.typing = None;
    }

    #[allow(dead_code)] // API completeness
    pub fn is_typing(&self) -> bool {
        self.typing.is_some()
    }

    /// Entries in render order
    pub fn entries(&self) -> impl Iterator<Item = &UiMessage> {
        self.messages.iter().chain(self.typing.iter())
    }

    /// Rendered turns and errors, without the typing indicator
    #[allow(dead_code)] // API completeness
    pub fn messages(&self) -> &[UiMessage] {
        &self.messages
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Clamp the scroll offset once the renderer knows how much fits
    pub fn clamp_scroll(&mut self, max_back: u16) {
        self.scroll_back = self.scroll_back.min(max_back);
    }

    fn push(&mut self, message: UiMessage) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }
}
