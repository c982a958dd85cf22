use api::RequestInit;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::SaferwallClient;
use crate::error::LoaderError;
use crate::menu::{FileMenu, filter_file_menu};
use crate::types::ApiFile;

/// Fields fetched for the shared file page header.
pub const LAYOUT_FIELDS: &str =
    "first_seen,submissions,sha256,last_scanned,multiav,file_format,pe.meta";

const FILES_SEGMENT: &str = "/files/";

/// Model shared by every page under `/files/{hash}`.
#[derive(Debug, Clone, Serialize)]
pub struct FileLayout {
    pub hash: String,
    pub file: ApiFile,
    /// Route segments after `/files/`, starting with the hash.
    pub paths: Vec<String>,
    /// The tab whose path matches the second route segment.
    pub active_menu: Option<FileMenu>,
    pub file_menu: Vec<FileMenu>,
}

/// Loads the file page header and its navigation tabs.
///
/// A failed fetch is not an error: the page renders with an empty record and
/// the PE tab hidden.
///
/// ## Errors
///
/// Returns [`LoaderError::InvalidPath`] if `pathname` has no `/files/`
/// segment.
pub async fn load_file_layout(
    client: &SaferwallClient,
    hash: &str,
    pathname: &str,
    menu: &[FileMenu],
) -> Result<FileLayout, LoaderError> {
    let paths: Vec<String> = pathname
        .split(FILES_SEGMENT)
        .nth(1)
        .ok_or_else(|| LoaderError::InvalidPath {
            path: pathname.to_string(),
        })?
        .split('/')
        .map(str::to_string)
        .collect();

    let active_menu = paths
        .get(1)
        .and_then(|active| menu.iter().find(|entry| entry.path == *active))
        .cloned();

    let endpoint = format!("files/{hash}?fields={LAYOUT_FIELDS}");
    let (file, file_menu) = match client
        .request::<ApiFile>(&endpoint, false, RequestInit::new())
        .await
    {
        Ok(file) => {
            let file_menu = filter_file_menu(menu, file.file_format.as_deref());
            (file, file_menu)
        }
        Err(err) => {
            warn!(hash, error = %err, "file lookup failed, rendering empty layout");
            (ApiFile::default(), filter_file_menu(menu, None))
        }
    };

    debug!(hash, tabs = file_menu.len(), "file layout loaded");

    Ok(FileLayout {
        hash: hash.to_string(),
        file,
        paths,
        active_menu,
        file_menu,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::default_file_menu;
    use api::ApiConfig;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    #[traced_test]
    async fn test_fetch_failure_is_logged() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/abc"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = SaferwallClient::anonymous(ApiConfig::new(mock_server.uri())).unwrap();
        let layout = load_file_layout(&client, "abc", "/files/abc", &default_file_menu())
            .await
            .unwrap();

        assert_eq!(layout.paths, vec!["abc"]);
        assert!(logs_contain("file lookup failed"));
    }

    #[tokio::test]
    async fn test_trailing_slash_yields_empty_segment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = SaferwallClient::anonymous(ApiConfig::new(mock_server.uri())).unwrap();
        let layout = load_file_layout(&client, "abc", "/files/abc/", &default_file_menu())
            .await
            .unwrap();

        assert_eq!(layout.paths, vec!["abc", ""]);
        assert!(layout.active_menu.is_none());
    }
}
