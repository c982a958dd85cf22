//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP client layer.
///
/// These errors represent failures that happen before a response status is
/// available: transport errors, malformed URLs, and unusable request parts.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request could not be assembled or sent.
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl ClientError {
    /// Returns `true` if the underlying transport reported a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
            Self::Connection(_) => false,
        }
    }
}
