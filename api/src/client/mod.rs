//! HTTP client module.
//!
//! This module provides the async HTTP client for executing API requests
//! with bearer authentication, browser cache hints and tracing
//! instrumentation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use api::{ApiClient, ApiConfig, ExecutionContext, RequestInit, RestMethod};
//!
//! let client = ApiClient::builder(ApiConfig::from_env()?)
//!     .bearer_token("session-token")
//!     .context(ExecutionContext::browser())
//!     .build()?;
//!
//! // Cacheable read
//! let user: serde_json::Value = client.request("users/alice", true, RequestInit::new()).await?;
//!
//! // Write with a JSON body
//! let init = RequestInit::new()
//!     .method(RestMethod::Post)
//!     .json(&serde_json::json!({ "email": "alice@example.com" }))?;
//! let _: serde_json::Value = client.request("auth/reset-password", false, init).await?;
//! ```

mod executor;

pub use executor::{ApiClient, ApiClientBuilder};
