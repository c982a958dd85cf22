//! Error types for the portal library.

use api::ApiError;
use thiserror::Error;

/// Errors raised by page loaders.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The route path does not have the expected shape.
    #[error("invalid route path: {path}")]
    InvalidPath { path: String },

    /// The API response lacks a field the page needs.
    #[error("response is missing field `{field}`")]
    MissingField { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LoaderError::InvalidPath {
            path: "/users/alice".to_string(),
        };
        assert_eq!(err.to_string(), "invalid route path: /users/alice");

        let err = LoaderError::MissingField { field: "pe" };
        assert_eq!(err.to_string(), "response is missing field `pe`");
    }
}
