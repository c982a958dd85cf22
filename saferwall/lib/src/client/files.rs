use api::{ApiError, RequestInit, RestMethod, UploadFile};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::SaferwallClient;
use crate::types::{ApiFile, FileSummary};

/// Fields requested for the file header block.
pub const FILE_META_FIELDS: &str =
    "first_seen,submissions,sha256,last_scanned,multiav,file_format,pe.meta,liked";

#[derive(Deserialize)]
struct FileStatus {
    status: i64,
}

impl SaferwallClient {
    /// Returns the processing status code of a file.
    pub async fn get_file_status(&self, hash: &str) -> Result<i64, ApiError> {
        let file: FileStatus = self
            .request(&format!("files/{hash}?fields=status"), false, RequestInit::new())
            .await?;
        Ok(file.status)
    }

    /// Uploads a file for scanning.
    ///
    /// The body is a multipart form with the file under `file`.
    pub async fn upload_file(&self, file: UploadFile) -> Result<ApiFile, ApiError> {
        debug!(file_name = file.file_name(), size = file.size(), "uploading file");
        let init = RequestInit::new().method(RestMethod::Post).multipart(file);
        self.request("files/", false, init).await
    }

    /// Returns the full file record. Cacheable.
    pub async fn get_file(&self, hash: &str) -> Result<ApiFile, ApiError> {
        self.request(&format!("files/{hash}"), true, RequestInit::new())
            .await
    }

    /// Returns the fields shown in the file page header.
    pub async fn get_file_meta(&self, hash: &str) -> Result<ApiFile, ApiError> {
        self.request(
            &format!("files/{hash}?fields={FILE_META_FIELDS}"),
            false,
            RequestInit::new(),
        )
        .await
    }

    /// Returns the file record merged with its summary.
    pub async fn get_file_summary(&self, hash: &str) -> Result<FileSummary, ApiError> {
        self.request(&format!("files/{hash}/summary"), false, RequestInit::new())
            .await
    }

    /// Likes a file, or removes the like when `like` is `false`.
    pub async fn like_file(&self, hash: &str, like: bool) -> Result<Value, ApiError> {
        let action = if like { "like" } else { "unlike" };
        self.request(
            &format!("files/{hash}/{action}"),
            false,
            RequestInit::new().method(RestMethod::Post),
        )
        .await
    }
}
