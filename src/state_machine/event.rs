//! Events that drive the chat cycle

use crate::transport::SendFailure;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Send trigger (Enter or the send button) with the raw input text
    Submit { text: String },

    /// The transport resolved with a reply
    ReplyReceived { text: String },
    /// The transport resolved with a failure
    SendFailed { failure: SendFailure },
}

impl From<Result<String, SendFailure>> for Event {
    fn from(result: Result<String, SendFailure>) -> Self {
        match result {
            Ok(text) => Event::ReplyReceived { text },
            Err(failure) => Event::SendFailed { failure },
        }
    }
}
