//! Transport error types

use thiserror::Error;

/// Why a send did not produce a reply.
///
/// `Display` is the text shown to the user. Network detail stays out of it
/// and is only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendFailure {
    /// 2xx response with a missing or blank `response` field
    #[error("The server returned an empty reply.")]
    EmptyReply,
    /// Non-2xx response
    #[error("{message}")]
    ServerError { status: u16, message: String },
    /// Unreachable host, timeout, or an unreadable response
    #[error("Could not reach the chat server.")]
    Network { detail: String },
}

impl SendFailure {
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    /// HTTP status of a server error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::EmptyReply | Self::Network { .. } => None,
        }
    }

    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyReply => "empty_reply",
            Self::ServerError { .. } => "server_error",
            Self::Network { .. } => "network",
        }
    }
}

/// Failure to construct the HTTP client
#[derive(Debug, Error)]
pub enum TransportBuildError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
