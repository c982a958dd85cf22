//! Body encoding and decoding errors.

use thiserror::Error;

/// Errors while turning bodies into typed values and back.
///
/// The client performs no schema validation beyond what `serde` needs to
/// build the caller's type.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON response body could not be decoded into the requested type.
    #[error("JSON parse error: {0}")]
    JsonParse(#[source] serde_json::Error),

    /// Request payload could not be serialized to JSON.
    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ValidationError {
    /// Returns `true` if this is a response parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}
