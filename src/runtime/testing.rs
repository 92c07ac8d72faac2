//! Mock implementations for testing
//!
//! These mocks enable controller tests without real I/O.

use crate::conversation::Turn;
use crate::transport::{ChatTransport, SendFailure};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// Mock transport that returns queued outcomes
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<String, SendFailure>>>,
    /// Record of every history sent
    requests: Mutex<Vec<Vec<Turn>>>,
    /// When set, each send waits for a permit before resolving
    gate: Option<Semaphore>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// A transport whose requests stay in flight until `release` is called
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn queue_failure(&self, failure: SendFailure) {
        self.outcomes.lock().unwrap().push_back(Err(failure));
    }

    /// Let one held request resolve
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn recorded_requests(&self) -> Vec<Vec<Turn>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, history: &[Turn]) -> Result<String, SendFailure> {
        self.requests.lock().unwrap().push(history.to_vec());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SendFailure::network("No mock response queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport() {
        let mock = MockTransport::new();
        mock.queue_reply("Hello");

        let history = vec![Turn::user("hi")];
        assert_eq!(mock.send(&history).await, Ok("Hello".to_string()));

        // Second call fails (nothing queued)
        let result = mock.send(&history).await;
        assert!(matches!(result, Err(SendFailure::Network { .. })));
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
