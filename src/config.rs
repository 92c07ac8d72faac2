//! Widget configuration from the environment

use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";
const DEFAULT_LOG_FILE: &str = "chat-widget.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CHAT_WIDGET_ENDPOINT is not a valid http(s) URL: {0}")]
    InvalidEndpoint(String),
    #[error("CHAT_WIDGET_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Full URL the history is POSTed to
    pub endpoint: Url,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
    pub log_path: PathBuf,
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_endpoint =
            lookup("CHAT_WIDGET_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(raw_endpoint.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or(ConfigError::InvalidEndpoint(raw_endpoint))?;

        let request_timeout = match lookup("CHAT_WIDGET_TIMEOUT_SECS") {
            None => None,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        let log_path = lookup("CHAT_WIDGET_LOG")
            .map_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE), PathBuf::from);

        Ok(Self {
            endpoint,
            request_timeout,
            log_path,
        })
    }
}
