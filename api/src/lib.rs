//! Typed REST request layer.
//!
//! The `api` crate turns a relative endpoint plus a few per-call overrides
//! into an HTTP request against a configured base URL, and decodes the JSON
//! answer into the caller's type.
//!
//! ## Features
//!
//! - **Request builder**: default JSON headers, fetch-style overrides ([`RequestInit`])
//! - **Auth decoration**: `Authorization: Bearer <token>` fixed at construction
//! - **Cache decoration**: opt-in response reuse, honoured only in a browser
//!   [`ExecutionContext`]
//! - **Failed responses as values**: any non-success status surfaces as
//!   [`ApiError::Response`] with the status, headers and body intact
//! - **Tracing**: every request runs in an `api_request` span
//!
//! ## Example
//!
//! ```rust,ignore
//! use api::{ApiClient, ApiConfig, RequestInit};
//!
//! #[derive(serde::Deserialize)]
//! struct Status { status: i64 }
//!
//! let client = ApiClient::new(ApiConfig::new("https://api.example.com/v1"))?;
//! let status: Status = client
//!     .request("files/abc?fields=status", false, RequestInit::new())
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod method;
pub mod request;
pub mod response;

// Re-exports for convenience
pub use client::{ApiClient, ApiClientBuilder};
pub use config::{ApiConfig, API_URL_ENV};
pub use context::{ExecutionContext, ResponseCache};
pub use error::{ApiError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use request::{CacheMode, PreparedRequest, RequestBody, RequestInit, UploadFile};
pub use response::FailedResponse;
