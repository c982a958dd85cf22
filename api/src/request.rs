//! Request descriptors.
//!
//! A [`RequestInit`] holds the per-call overrides a caller passes to
//! [`ApiClient::request`](crate::ApiClient::request). The client merges it
//! with its defaults and decorations into a [`PreparedRequest`], which is
//! built fresh for every call and consumed when sent.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
use reqwest::multipart::Part;
use serde::Serialize;

use crate::error::{ClientError, ValidationError};
use crate::method::RestMethod;

/// Content type sent with every request unless the caller replaces the headers.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Multipart field name used for file uploads.
pub const UPLOAD_FIELD: &str = "file";

/// Whether a request may be answered from a previously stored response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Always go to the network.
    #[default]
    Default,
    /// Reuse any stored response for the same URL, fetching only on a miss.
    ForceCache,
}

/// A file to send as the single part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    file_name: String,
    bytes: Bytes,
    content_type: Option<String>,
}

impl UploadFile {
    /// Creates an upload from a file name and its contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    /// Sets the MIME type of the part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the file contents.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the MIME type, if one was set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub(crate) fn into_part(self) -> Result<Part, ClientError> {
        let part = Part::bytes(self.bytes.to_vec()).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ClientError::Connection(format!("invalid MIME type {mime}: {e}"))),
            None => Ok(part),
        }
    }
}

/// Body of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A serialized JSON document.
    Json(String),
    /// A multipart form with a single file part.
    Multipart(UploadFile),
}

/// Per-call request overrides.
///
/// Mirrors the subset of a fetch `init` the portal uses: method, headers and
/// body. When `headers` is set it replaces the client's default headers
/// wholesale rather than being merged into them.
///
/// ## Examples
///
/// ```rust
/// use api::{RequestInit, RestMethod};
///
/// let init = RequestInit::new()
///     .method(RestMethod::Post)
///     .json(&serde_json::json!({ "email": "alice@example.com" }))
///     .unwrap();
/// assert_eq!(init.effective_method(), RestMethod::Post);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// HTTP method; `GET` when unset.
    pub method: Option<RestMethod>,
    /// Headers replacing the defaults, when set.
    pub headers: Option<HeaderMap>,
    /// Request body.
    pub body: RequestBody,
}

impl RequestInit {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: RestMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Replaces the header map.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds one header to the override map, creating the map if needed.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Serializes `payload` as the JSON body.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::Serialize`] if the payload cannot be
    /// serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ValidationError> {
        let body = serde_json::to_string(payload).map_err(ValidationError::Serialize)?;
        self.body = RequestBody::Json(body);
        Ok(self)
    }

    /// Sends `file` as a multipart form.
    ///
    /// Adds a `Content-Length` header carrying the file size. Setting an
    /// override header drops the default JSON content type; the multipart
    /// content type is set by the transport.
    #[must_use]
    pub fn multipart(self, file: UploadFile) -> Self {
        let size = file.size();
        let mut init = self.header(CONTENT_LENGTH, HeaderValue::from(size));
        init.body = RequestBody::Multipart(file);
        init
    }

    /// Returns the method that will be used.
    pub fn effective_method(&self) -> RestMethod {
        self.method.unwrap_or_default()
    }
}

/// A fully decorated request, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub(crate) url: String,
    pub(crate) method: RestMethod,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
    pub(crate) cache: CacheMode,
}

impl PreparedRequest {
    /// Returns the full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns the cache directive.
    pub fn cache(&self) -> CacheMode {
        self.cache
    }
}
