use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::client::handle_response;
use crate::{AppwriteClient, AppwriteError, UNIQUE_ID};

/// Metadata the backend returns for a stored blob.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketFile {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub size_original: u64,
}

impl AppwriteClient {
    /// Upload a blob into the configured bucket with a server-minted id.
    pub async fn create_file(
        &self,
        filename: &str,
        data: Bytes,
    ) -> Result<BucketFile, AppwriteError> {
        let path = format!("/storage/buckets/{}/files", self.config.bucket_id);
        let part = Part::bytes(data.to_vec()).file_name(filename.to_string());
        let form = Form::new().text("fileId", UNIQUE_ID).part("file", part);
        let resp = self
            .send(self.client.post(self.url(&path)).multipart(form))
            .await?;
        handle_response(resp).await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<BucketFile, AppwriteError> {
        let path = format!(
            "/storage/buckets/{}/files/{file_id}",
            self.config.bucket_id
        );
        self.get_json(&path).await
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<(), AppwriteError> {
        let path = format!(
            "/storage/buckets/{}/files/{file_id}",
            self.config.bucket_id
        );
        self.delete_req(&path).await
    }

    /// Browser-facing view URL for a stored blob. The shape must match the
    /// backend's public file endpoint exactly or consumers cannot fetch it.
    pub fn file_view_url(&self, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{file_id}/view?project={}",
            self.config.endpoint, self.config.bucket_id, self.config.project_id
        )
    }

    /// Same as [`Self::file_view_url`] but forcing a download disposition.
    pub fn file_download_url(&self, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{file_id}/download?project={}",
            self.config.endpoint, self.config.bucket_id, self.config.project_id
        )
    }
}
