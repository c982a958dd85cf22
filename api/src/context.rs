//! Execution context for API clients.
//!
//! Server-rendered requests always go to the network. Requests issued on
//! behalf of a browser session may opt into reusing an earlier response; the
//! [`ResponseCache`] behind [`ExecutionContext::Browser`] is where those
//! responses live.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bytes::Bytes;

/// Where a client's requests are being executed.
#[derive(Debug, Clone, Default)]
pub enum ExecutionContext {
    /// Server-side rendering. Cache hints are ignored.
    #[default]
    Server,
    /// Browser session backed by a shared response cache.
    Browser(ResponseCache),
}

impl ExecutionContext {
    /// Creates a browser context with an empty cache.
    pub fn browser() -> Self {
        Self::Browser(ResponseCache::new())
    }

    /// Returns `true` for a browser context.
    pub fn is_browser(&self) -> bool {
        matches!(self, Self::Browser(_))
    }

    /// Returns the response cache of a browser context.
    pub fn cache(&self) -> Option<&ResponseCache> {
        match self {
            Self::Browser(cache) => Some(cache),
            Self::Server => None,
        }
    }
}

/// Successful response bodies keyed by full request URL.
///
/// Clones share the same storage. Entries never expire: a cached body is
/// served for as long as the cache lives, the way `force-cache` treats a
/// browser's HTTP cache.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl ResponseCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `url`, if any.
    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.entries.read().ok()?.get(url).cloned()
    }

    /// Stores the body for `url`, replacing any previous entry.
    pub fn insert(&self, url: impl Into<String>, body: Bytes) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(url.into(), body);
        }
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_server() {
        let context = ExecutionContext::default();
        assert!(!context.is_browser());
        assert!(context.cache().is_none());
    }

    #[test]
    fn test_browser_has_cache() {
        let context = ExecutionContext::browser();
        assert!(context.is_browser());
        assert!(context.cache().is_some_and(ResponseCache::is_empty));
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = ResponseCache::new();
        let other = cache.clone();
        cache.insert("https://api.example.com/users/alice", Bytes::from_static(b"{}"));

        assert_eq!(other.len(), 1);
        assert_eq!(
            other.get("https://api.example.com/users/alice"),
            Some(Bytes::from_static(b"{}"))
        );
    }

    #[test]
    fn test_insert_replaces_entry() {
        let cache = ResponseCache::new();
        cache.insert("a", Bytes::from_static(b"1"));
        cache.insert("a", Bytes::from_static(b"2"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), Some(Bytes::from_static(b"2")));
    }
}
