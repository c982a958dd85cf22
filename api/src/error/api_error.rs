//! Top-level API error type.

use super::{ClientError, ConfigError, ValidationError};
use crate::response::FailedResponse;
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Response(r) => eprintln!("Rejected with {}", r.status()),
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Validation(e) => eprintln!("Invalid body: {e}"),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status code.
    ///
    /// No distinction is made between 4xx and 5xx here; inspect the
    /// response status and body to tell them apart.
    #[error("{0}")]
    Response(FailedResponse),

    /// HTTP client errors (network, timeout, connection failures).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Body encoding or decoding errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the failed response if the server rejected the request.
    pub fn response(&self) -> Option<&FailedResponse> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }

    /// Consumes the error, returning the failed response if there was one.
    pub fn into_response(self) -> Option<FailedResponse> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status code when one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(response) => Some(response.status_code()),
            Self::Client(ClientError::Request(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<FailedResponse> for ApiError {
    fn from(response: FailedResponse) -> Self {
        Self::Response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::Connection("refused".to_string());
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
        assert_eq!(api_err.status(), None);
    }

    #[test]
    fn test_from_failed_response() {
        let response = FailedResponse::new(
            StatusCode::NOT_FOUND,
            "https://api.example.com/files/abc",
            Default::default(),
            bytes::Bytes::from_static(b"{\"message\":\"file not found\"}"),
        );
        let api_err: ApiError = response.into();
        assert_eq!(api_err.status(), Some(404));
        assert!(api_err.response().is_some());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Config(ConfigError::MissingEnv {
            var: "PUBLIC_API_URL",
        });
        assert!(err.to_string().contains("PUBLIC_API_URL"));
    }
}
