//! Chat controller
//!
//! Owns the conversation, the message panel and the input line for the
//! lifetime of the UI. Events go through the pure state machine and the
//! resulting effects are executed here. The network call runs as a spawned
//! task that reports back over a channel, so the UI keeps handling input
//! while a request is in flight.

#[cfg(test)]
pub mod testing;

use crate::conversation::Conversation;
use crate::input::InputLine;
use crate::panel::MessagePanel;
use crate::state_machine::{transition, ChatState, Effect, Event, TransitionError};
use crate::transport::ChatTransport;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct ChatController<T>
where
    T: ChatTransport + 'static,
{
    state: ChatState,
    conversation: Conversation,
    panel: MessagePanel,
    input: InputLine,
    /// Set while the last turn is an optimistic user turn that a failure may undo
    pending_user_turn: bool,
    transport: Arc<T>,
    outcome_tx: mpsc::UnboundedSender<Event>,
    outcome_rx: mpsc::UnboundedReceiver<Event>,
}

impl<T> ChatController<T>
where
    T: ChatTransport + 'static,
{
    pub fn new(transport: T) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: ChatState::Idle,
            conversation: Conversation::new(),
            panel: MessagePanel::new(),
            input: InputLine::new(),
            pending_user_turn: false,
            transport: Arc::new(transport),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn panel(&self) -> &MessagePanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut MessagePanel {
        &mut self.panel
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.input
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Send trigger: Enter or the send button
    pub fn submit(&mut self) {
        let text = self.input.text().to_string();
        self.dispatch(Event::Submit { text });
    }

    pub fn dispatch(&mut self, event: Event) {
        match transition(self.state, event) {
            Ok(result) => {
                if result.new_state != self.state {
                    tracing::debug!(
                        from = self.state.label(),
                        to = result.new_state.label(),
                        "State transition"
                    );
                }
                self.state = result.new_state;
                for effect in result.effects {
                    self.execute_effect(effect);
                }
            }
            Err(TransitionError::Busy) => {
                tracing::debug!("Ignoring submit while a reply is pending");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping event");
            }
        }
    }

    /// Wait for the in-flight request to report its outcome
    pub async fn next_outcome(&mut self) -> Option<Event> {
        self.outcome_rx.recv().await
    }

    /// Wait for the in-flight request and apply its outcome
    #[allow(dead_code)] // Headless driving; the TUI selects on next_outcome
    pub async fn settle(&mut self) {
        if let Some(event) = self.next_outcome().await {
            self.dispatch(event);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ClearInput => self.input.clear(),

            Effect::AppendUser { text } => {
                self.pending_user_turn = self.conversation.append_user(&text);
                if !self.pending_user_turn {
                    tracing::warn!("Conversation rejected a blank user turn");
                }
            }

            Effect::AppendModel { text } => {
                self.pending_user_turn = false;
                self.conversation.append_model(&text);
            }

            // Only the turn this cycle appended may be removed
            Effect::RollbackLast => {
                if std::mem::take(&mut self.pending_user_turn) {
                    self.conversation.rollback_last();
                } else {
                    tracing::warn!("Rollback requested without a pending user turn");
                }
            }

            Effect::RenderTurn { turn } => self.panel.push_turn(&turn),

            Effect::RenderError { message } => self.panel.push_error(&message),

            Effect::ShowTyping => self.panel.show_typing(),

            Effect::HideTyping => self.panel.hide_typing(),

            Effect::RequestReply => {
                let history = self.conversation.snapshot();
                let transport = Arc::clone(&self.transport);
                let outcome_tx = self.outcome_tx.clone();

                tracing::info!(history_len = history.len(), "Sending conversation (background)");

                tokio::spawn(async move {
                    let event = Event::from(transport.send(&history).await);
                    if outcome_tx.send(event).is_err() {
                        tracing::debug!("Controller gone before reply arrived");
                    }
                });
            }
        }
    }
}
