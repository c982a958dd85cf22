//! Layered error types for the API crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all API operations
//! - [`ClientError`] - HTTP client and network errors
//! - [`ValidationError`] - Response decoding and request encoding errors
//! - [`ConfigError`] - Client configuration errors
//!
//! A non-success HTTP status is not wrapped in any of the above: it surfaces
//! as [`ApiError::Response`] carrying the untouched [`FailedResponse`](crate::FailedResponse).

mod api_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
