//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct for executing HTTP requests
//! against the portal API with automatic auth handling, cache hints and
//! tracing.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE,
};
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn, Span};
use url::Url;

use crate::config::ApiConfig;
use crate::context::ExecutionContext;
use crate::error::{ApiError, ClientError, ConfigError};
use crate::method::RestMethod;
use crate::request::{
    CacheMode, PreparedRequest, RequestBody, RequestInit, JSON_CONTENT_TYPE, UPLOAD_FIELD,
};
use crate::response::{decode_json, FailedResponse};

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: ApiConfig,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
    bearer_token: Option<String>,
    context: ExecutionContext,
}

impl ApiClientBuilder {
    /// Creates a new builder with the specified configuration.
    fn new(config: ApiConfig) -> Self {
        Self {
            config,
            timeout: None,
            default_headers: HeaderMap::new(),
            bearer_token: None,
            context: ExecutionContext::default(),
        }
    }

    /// Sets a request timeout.
    ///
    /// No timeout is applied unless one is set here; requests otherwise wait
    /// as long as the transport does.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(config)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent by the underlying transport on every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the bearer token sent in the `Authorization` header.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let client = ApiClient::builder(config)
    ///     .bearer_token(session_token)
    ///     .build()?;
    /// ```
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the execution context. Defaults to [`ExecutionContext::Server`].
    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the token cannot be used as a header value or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let authorization = self
            .bearer_token
            .map(|token| {
                HeaderValue::try_from(format!("Bearer {token}"))
                    .map(|mut value| {
                        value.set_sensitive(true);
                        value
                    })
                    .map_err(|_| ConfigError::invalid_header("bearer token is not a valid header value"))
            })
            .transpose()?;

        let mut builder = reqwest::Client::builder()
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Request)?;

        Ok(ApiClient {
            client,
            config: self.config,
            authorization,
            context: self.context,
        })
    }
}

/// Async HTTP client for executing API requests.
///
/// The client wraps `reqwest::Client` with connection pooling. Besides the
/// pooled connections it holds only values fixed at construction: the
/// configuration, the optional credential, and the execution context.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::{ApiClient, ApiConfig};
///
/// #[derive(serde::Deserialize)]
/// struct User { username: String }
///
/// let client = ApiClient::new(ApiConfig::new("https://api.example.com/v1"))?;
/// let user: User = client.request("users/alice", true, Default::default()).await?;
/// println!("User: {}", user.username);
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
    authorization: Option<HeaderValue>,
    context: ExecutionContext,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(config: ApiConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Creates an unauthenticated server-side client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Self::builder(config).build()
    }

    /// Returns the configuration for this client.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the execution context for this client.
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Returns `true` if requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.authorization.is_some()
    }

    /// Builds the decorated request for `endpoint` without sending it.
    ///
    /// The URL is the configured base, a `/`, and `endpoint`. Headers default
    /// to `Content-Type: application/json` unless `init` supplies its own
    /// map. When `cache` is set on a `GET` and the client runs in a browser
    /// context the request is marked [`CacheMode::ForceCache`]; on the server
    /// and for other verbs the hint is dropped. The bearer credential, if any, is merged in last.
    pub fn prepare(&self, endpoint: &str, cache: bool, init: RequestInit) -> PreparedRequest {
        let method = init.effective_method();
        let headers = init.headers.unwrap_or_else(|| {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            headers
        });

        let mut prepared = PreparedRequest {
            url: self.config.endpoint_url(endpoint),
            method,
            headers,
            body: init.body,
            cache: CacheMode::Default,
        };

        if cache {
            self.cache_request(&mut prepared);
        }
        self.set_auth_headers(&mut prepared);

        prepared
    }

    /// Sends a request to `endpoint` and decodes the JSON response as `T`.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The server answers with a non-success status ([`ApiError::Response`])
    /// - The request cannot be sent (network, timeout, malformed URL)
    /// - The body is not valid JSON for `T`
    pub async fn request<T>(
        &self,
        endpoint: &str,
        cache: bool,
        init: RequestInit,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let prepared = self.prepare(endpoint, cache, init);
        self.send(prepared).await
    }

    /// Sends an already prepared request and decodes the JSON response.
    ///
    /// Under [`CacheMode::ForceCache`] a stored body for the same URL is
    /// returned without touching the network; a successful fetch is stored.
    ///
    /// ## Errors
    ///
    /// See [`request`](Self::request).
    #[instrument(
        name = "api_request",
        skip(self, prepared),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
            cache.hit = tracing::field::Empty,
        )
    )]
    pub async fn send<T>(&self, prepared: PreparedRequest) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let span = Span::current();
        span.record("http.method", prepared.method.as_str());
        span.record("http.url", prepared.url.as_str());

        let cache = match prepared.cache {
            CacheMode::ForceCache => self.context.cache(),
            CacheMode::Default => None,
        };

        if let Some(cache) = cache {
            if let Some(body) = cache.get(&prepared.url) {
                span.record("cache.hit", true);
                debug!("serving response from cache");
                return Ok(decode_json(&body)?);
            }
            span.record("cache.hit", false);
        }

        let PreparedRequest {
            url: raw_url,
            method,
            mut headers,
            body,
            ..
        } = prepared;

        let url = Url::parse(&raw_url)
            .map_err(|e| ClientError::Connection(format!("invalid URL: {e}")))?;

        let request = self.client.request(method.to_reqwest(), url);
        let request = match body {
            RequestBody::Empty => request.headers(headers),
            RequestBody::Json(json) => request.headers(headers).body(json),
            RequestBody::Multipart(file) => {
                // The transport frames the multipart body and owns both headers.
                headers.remove(CONTENT_LENGTH);
                headers.remove(CONTENT_TYPE);
                let form = Form::new().part(UPLOAD_FIELD, file.into_part()?);
                request.headers(headers).multipart(form)
            }
        };

        let response = request.send().await.map_err(ClientError::Request)?;

        let status = response.status();
        span.record("http.status_code", status.as_u16());

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            span.record("otel.status_code", otel_status);

            let headers = response.headers().clone();
            let body = response.bytes().await.map_err(ClientError::Request)?;
            warn!(status = status.as_u16(), "request rejected by API");

            return Err(FailedResponse::new(status, raw_url, headers, body).into());
        }

        span.record("otel.status_code", "OK");

        let body = response.bytes().await.map_err(ClientError::Request)?;
        let parsed = decode_json(&body)?;

        if let Some(cache) = cache {
            cache.insert(raw_url, body);
        }

        Ok(parsed)
    }

    /// Marks a `GET` as cacheable when running in a browser.
    fn cache_request(&self, prepared: &mut PreparedRequest) {
        if self.context.is_browser() && prepared.method == RestMethod::Get {
            prepared.cache = CacheMode::ForceCache;
        }
    }

    /// Merges the bearer credential into the request headers.
    fn set_auth_headers(&self, prepared: &mut PreparedRequest) {
        if let Some(authorization) = &self.authorization {
            prepared
                .headers
                .insert(AUTHORIZATION, authorization.clone());
        }
    }
}
