//! Client configuration errors.

use thiserror::Error;

/// Errors in API client configuration.
///
/// These errors occur during client setup, typically indicating a missing
/// environment binding or an unusable default header.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The name of the missing variable.
        var: &'static str,
    },

    /// A default header name or value could not be used.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        let err = ConfigError::MissingEnv {
            var: "PUBLIC_API_URL",
        };
        assert_eq!(err.to_string(), "Missing environment variable: PUBLIC_API_URL");
    }

    #[test]
    fn test_invalid_header() {
        let err = ConfigError::invalid_header("invalid header name: X Bad");
        assert!(err.to_string().contains("Invalid header"));
    }
}
