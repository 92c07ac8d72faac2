//! Transport to the chat backend
//!
//! One request per user turn, carrying the full history. Every outcome,
//! HTTP-level or transport-level, comes back as a `Result` so the caller
//! has a single handling path.

mod error;
mod http;
mod wire;

pub use error::{SendFailure, TransportBuildError};
pub use http::HttpTransport;

use crate::conversation::Turn;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends a conversation and resolves to the model's reply.
///
/// Implementations are stateless; keeping a single request in flight is the
/// caller's job.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, history: &[Turn]) -> Result<String, SendFailure>;

    /// Where requests go, for display and logs
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, history: &[Turn]) -> Result<String, SendFailure> {
        (**self).send(history).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport {
    inner: Arc<dyn ChatTransport>,
    endpoint: String,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn ChatTransport>) -> Self {
        let endpoint = inner.endpoint().to_string();
        Self { inner, endpoint }
    }
}

#[async_trait]
impl ChatTransport for LoggingTransport {
    async fn send(&self, history: &[Turn]) -> Result<String, SendFailure> {
        let start = std::time::Instant::now();
        let result = self.inner.send(history).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    history_len = history.len(),
                    reply_chars = reply.chars().count(),
                    "Chat request completed"
                );
            }
            Err(SendFailure::Network { detail }) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    history_len = history.len(),
                    error = %detail,
                    "Chat request failed to reach server"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    history_len = history.len(),
                    kind = e.kind(),
                    status = e.status(),
                    error = %e,
                    "Chat request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
