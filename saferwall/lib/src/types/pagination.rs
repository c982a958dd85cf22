//! Paginated list envelope.

use serde::{Deserialize, Serialize};

/// A page of results.
///
/// `items` is `None` when the API sends `null` or omits it; loaders normalise
/// it to an empty list before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPagination<T> {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub page_count: Option<i64>,
    pub total_count: Option<i64>,
    pub items: Option<Vec<T>>,
}

impl<T> ApiPagination<T> {
    /// Returns the items, or an empty slice when there are none.
    pub fn items(&self) -> &[T] {
        self.items.as_deref().unwrap_or_default()
    }
}
