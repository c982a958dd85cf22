//! Portal API client.
//!
//! [`SaferwallClient`] exposes one method per remote operation and hides
//! endpoint paths, verbs and header construction from callers. The methods
//! are grouped by resource:
//!
//! - `files` - lookup, status, upload, summary, likes
//! - `users` - profiles, follows, activities, account management
//! - `auth` - login, logout, confirmation and password flows

mod auth;
mod files;
mod users;

use api::{ApiClient, ApiConfig, ApiError, ExecutionContext, RequestInit};
use serde::de::DeserializeOwned;

use crate::types::Session;

pub use files::FILE_META_FIELDS;

/// Typed client for the portal API.
///
/// Construction fixes the configuration, the optional bearer credential and
/// the execution context; every call afterwards is an independent round trip.
///
/// ## Examples
///
/// ```rust,ignore
/// use saferwall_lib::{SaferwallClient, Session};
/// use api::{ApiConfig, ExecutionContext};
///
/// let session = Session::with_token("token");
/// let client = SaferwallClient::new(
///     ApiConfig::from_env()?,
///     Some(&session),
///     ExecutionContext::Server,
/// )?;
///
/// let status = client.get_file_status("e3b0c442...").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SaferwallClient {
    api: ApiClient,
}

impl SaferwallClient {
    /// Creates a client, authenticated when `session` carries a token.
    ///
    /// ## Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be constructed.
    pub fn new(
        config: ApiConfig,
        session: Option<&Session>,
        context: ExecutionContext,
    ) -> Result<Self, ApiError> {
        let mut builder = ApiClient::builder(config).context(context);
        if let Some(token) = session.and_then(Session::token) {
            builder = builder.bearer_token(token);
        }

        Ok(Self {
            api: builder.build()?,
        })
    }

    /// Creates an unauthenticated server-side client.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn anonymous(config: ApiConfig) -> Result<Self, ApiError> {
        Self::new(config, None, ExecutionContext::Server)
    }

    /// Wraps an already configured request client.
    pub fn from_api(api: ApiClient) -> Self {
        Self { api }
    }

    /// Returns the underlying request client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Sends a request to an arbitrary endpoint.
    ///
    /// Route loaders use this for endpoints with ad-hoc `fields=` selections.
    ///
    /// ## Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn request<T>(
        &self,
        endpoint: &str,
        cache: bool,
        init: RequestInit,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.api.request(endpoint, cache, init).await
    }
}
