//! Saferwall portal client.
//!
//! This crate provides:
//!
//! - [`SaferwallClient`], one method per remote operation of the portal API
//! - [`types`], the records those operations exchange
//! - [`menu`], the file page navigation tabs
//! - [`loaders`], route loaders that turn API responses into page models
//!
//! The HTTP plumbing (configuration, execution context, caching, auth and
//! error channel) lives in the `api` crate and is re-exported where callers
//! need it.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use saferwall_lib::{ApiConfig, SaferwallClient};
//!
//! let client = SaferwallClient::anonymous(ApiConfig::from_env()?)?;
//! let file = client.get_file("e3b0c442...").await?;
//! println!("{:?}", file.file_format);
//! ```

pub mod client;
pub mod error;
pub mod loaders;
pub mod menu;
pub mod types;

pub use api::{ApiConfig, ApiError, ExecutionContext, FailedResponse, ResponseCache, UploadFile};
pub use client::{FILE_META_FIELDS, SaferwallClient};
pub use error::LoaderError;
pub use menu::{FileMenu, default_file_menu, filter_file_menu};
pub use types::*;
