//! Client configuration.
//!
//! The only setting the client needs is the base URL of the remote API. It is
//! resolved once and handed to every client explicitly.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the public API base URL.
pub const API_URL_ENV: &str = "PUBLIC_API_URL";

/// Configuration shared by every client in a process.
///
/// The URL is not validated; a malformed value only surfaces when a request
/// is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote API, without the trailing endpoint path.
    pub url: String,
}

impl ApiConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Resolves the configuration from [`API_URL_ENV`].
    ///
    /// A `.env` file in the working directory (or any parent) is loaded first
    /// when present.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the variable is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        std::env::var(API_URL_ENV)
            .map(Self::new)
            .map_err(|_| ConfigError::MissingEnv { var: API_URL_ENV })
    }

    /// Returns the base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Joins the base URL and a relative endpoint with a single `/`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use api::ApiConfig;
    ///
    /// let config = ApiConfig::new("https://api.example.com/v1");
    /// assert_eq!(
    ///     config.endpoint_url("files/abc?fields=status"),
    ///     "https://api.example.com/v1/files/abc?fields=status"
    /// );
    /// ```
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.url, endpoint)
    }
}
