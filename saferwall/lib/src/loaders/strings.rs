use api::RequestInit;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

use crate::client::SaferwallClient;
use crate::error::LoaderError;
use crate::types::{ApiPagination, ApiStrings};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Pagination parameters of a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: i64,
    pub per_page: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageQuery {
    /// Builds the query from raw parameter values.
    ///
    /// Values are parsed leniently: leading whitespace and trailing garbage
    /// are ignored (`"3abc"` is 3). Missing, unparseable and zero values fall
    /// back to the defaults. Negative values are kept.
    pub fn from_params(page: Option<&str>, per_page: Option<&str>) -> Self {
        Self {
            page: parse_or(page, DEFAULT_PAGE),
            per_page: parse_or(per_page, DEFAULT_PER_PAGE),
        }
    }

    /// Builds the query from a URL query string such as `page=2&per_page=50`.
    pub fn from_query(query: &str) -> Self {
        let mut page = None;
        let mut per_page = None;
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "page" if page.is_none() => page = Some(value.into_owned()),
                "per_page" if per_page.is_none() => per_page = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::from_params(page.as_deref(), per_page.as_deref())
    }

    /// Renders the query string, leaving out non-positive values.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if self.page > 0 {
            query.append_pair("page", &self.page.to_string());
        }
        if self.per_page > 0 {
            query.append_pair("per_page", &self.per_page.to_string());
        }
        query.finish()
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    match value.and_then(parse_leading_int) {
        Some(0) | None => default,
        Some(n) => n,
    }
}

/// Parses the leading integer of `value`, like a browser's `parseInt`.
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Loads one page of extracted strings.
///
/// Missing `items` are normalised to an empty list.
pub async fn load_strings(
    client: &SaferwallClient,
    hash: &str,
    query: PageQuery,
) -> Result<ApiPagination<ApiStrings>, LoaderError> {
    let endpoint = format!("files/{hash}/strings?{}", query.to_query_string());
    let mut pagination: ApiPagination<ApiStrings> =
        client.request(&endpoint, false, RequestInit::new()).await?;
    pagination.items.get_or_insert_with(Vec::new);
    debug!(
        hash,
        page = query.page,
        count = pagination.items().len(),
        "strings page loaded"
    );
    Ok(pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ApiConfig;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_defaults() {
        assert_eq!(PageQuery::from_params(None, None), PageQuery::default());
        assert_eq!(
            PageQuery::from_params(Some("0"), Some("abc")),
            PageQuery::default()
        );
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("3abc"), Some(3));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_from_query() {
        let query = PageQuery::from_query("?page=3&per_page=25&q=x");
        assert_eq!(
            query,
            PageQuery {
                page: 3,
                per_page: 25
            }
        );
        assert_eq!(query.to_query_string(), "page=3&per_page=25");
    }

    #[test]
    fn test_negative_values_are_omitted() {
        let query = PageQuery::from_params(Some("-2"), Some("20"));
        assert_eq!(query.page, -2);
        assert_eq!(query.to_query_string(), "per_page=20");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_load_logs_item_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/abc/strings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    { "encoding": "ascii", "value": "MZ" },
                    { "encoding": "wide", "value": "kernel32.dll" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = SaferwallClient::anonymous(ApiConfig::new(mock_server.uri())).unwrap();
        let page = load_strings(&client, "abc", PageQuery::default()).await.unwrap();

        assert_eq!(page.items().len(), 2);
        assert!(logs_contain("strings page loaded"));
        assert!(logs_contain("count=2"));
    }
}
