//! Response handling module.
//!
//! Successful bodies are decoded straight into the caller's type by the
//! client. This module holds [`FailedResponse`], the value surfaced for any
//! non-success status, along with the JSON decoding shared by both paths.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// A response the server answered with a non-success status code.
///
/// The status, headers and body are kept exactly as received so callers can
/// pull structured error detail out of the body themselves.
///
/// ## Examples
///
/// ```rust,ignore
/// match client.request::<Session>("auth/login", false, init).await {
///     Ok(session) => { /* ... */ }
///     Err(ApiError::Response(response)) => {
///         let detail: serde_json::Value = response.json()?;
///         eprintln!("{} rejected: {detail}", response.status());
///     }
///     Err(other) => return Err(other.into()),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FailedResponse {
    status: StatusCode,
    url: String,
    headers: HeaderMap,
    body: Bytes,
}

impl FailedResponse {
    /// Creates a failed response from its raw parts.
    pub fn new(status: StatusCode, url: impl Into<String>, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            url: url.into(),
            headers,
            body,
        }
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the HTTP status as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the URL the request was sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decodes the body as JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonParse`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        serde_json::from_slice(&self.body).map_err(ValidationError::JsonParse)
    }
}

impl fmt::Display for FailedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}", self.status, self.url)
    }
}

/// Decodes a successful response body.
///
/// An empty (or whitespace-only) body decodes as JSON `null`, so endpoints
/// answering `204 No Content` still produce `()` or `serde_json::Value::Null`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(ValidationError::JsonParse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(status: StatusCode, body: &'static [u8]) -> FailedResponse {
        FailedResponse::new(
            status,
            "https://api.example.com/users/",
            HeaderMap::new(),
            Bytes::from_static(body),
        )
    }

    #[test]
    fn test_json_body_is_accessible() {
        let response = failed(
            StatusCode::BAD_REQUEST,
            br#"{"username":"already taken"}"#,
        );
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["username"], "already taken");
        assert_eq!(response.status_code(), 400);
    }

    #[test]
    fn test_non_json_body() {
        let response = failed(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert!(response.json::<serde_json::Value>().is_err());
        assert_eq!(response.text(), "<html>bad gateway</html>");
    }

    #[test]
    fn test_display() {
        let response = failed(StatusCode::NOT_FOUND, b"");
        assert_eq!(
            response.to_string(),
            "HTTP 404 Not Found from https://api.example.com/users/"
        );
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let value: serde_json::Value = decode_json(b"").unwrap();
        assert!(value.is_null());
        let _: () = decode_json(b"  \n").unwrap();
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_json::<serde_json::Value>(b"not valid json");
        assert!(matches!(result, Err(ValidationError::JsonParse(_))));
    }
}
