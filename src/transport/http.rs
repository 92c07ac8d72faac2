//! reqwest-backed transport for the chat endpoint

use super::wire::{ChatReply, ChatRequest, ErrorBody};
use super::{ChatTransport, SendFailure, TransportBuildError};
use crate::config::WidgetConfig;
use crate::conversation::Turn;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

/// POSTs the conversation to a fixed endpoint
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(config: &WidgetConfig) -> Result<Self, TransportBuildError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, history: &[Turn]) -> Result<String, SendFailure> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("content-type", "application/json")
            .json(&ChatRequest::from_turns(history))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SendFailure::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    SendFailure::network(format!("Connection failed: {e}"))
                } else {
                    SendFailure::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SendFailure::network(format!("Failed to read response: {e}")))?;

        classify_response(status, &body)
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Map a settled HTTP exchange to a reply or a failure
pub fn classify_response(status: StatusCode, body: &str) -> Result<String, SendFailure> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Server responded with status {}", status.as_u16()));
        return Err(SendFailure::server_error(status.as_u16(), message));
    }

    let reply: ChatReply = serde_json::from_str(body).map_err(|e| {
        SendFailure::network(format!("Failed to parse response: {e} - body: {body}"))
    })?;

    reply
        .response
        .filter(|text| !text.trim().is_empty())
        .ok_or(SendFailure::EmptyReply)
}
