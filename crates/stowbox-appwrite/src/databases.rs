use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::handle_response;
use crate::{AppwriteClient, AppwriteError, Query, UNIQUE_ID};

/// A page of documents plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

impl AppwriteClient {
    /// Create a document with a server-minted id.
    pub async fn create_document<D: Serialize, T: DeserializeOwned>(
        &self,
        collection_id: &str,
        data: &D,
    ) -> Result<T, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{collection_id}/documents",
            self.config.database_id
        );
        self.post_json(&path, &json!({ "documentId": UNIQUE_ID, "data": data }))
            .await
    }

    /// List documents matching every given query operator.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<T>, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{collection_id}/documents",
            self.config.database_id
        );
        let mut builder = self.client.get(self.url(&path));
        for query in queries {
            builder = builder.query(&[("queries[]", query.to_wire())]);
        }
        let resp = self.send(builder).await?;
        handle_response(resp).await
    }

    /// Patch a document's attributes.
    pub async fn update_document<D: Serialize, T: DeserializeOwned>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<T, AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{collection_id}/documents/{document_id}",
            self.config.database_id
        );
        self.patch_json(&path, &json!({ "data": data })).await
    }

    pub async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), AppwriteError> {
        let path = format!(
            "/databases/{}/collections/{collection_id}/documents/{document_id}",
            self.config.database_id
        );
        self.delete_req(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppwriteConfig;

    fn live_client() -> Option<AppwriteClient> {
        AppwriteConfig::from_env().ok().map(AppwriteClient::new)
    }

    #[test]
    fn document_list_deserializes() {
        #[derive(Debug, Deserialize)]
        struct Doc {
            #[serde(rename = "$id")]
            id: String,
        }

        let json = r#"{ "total": 2, "documents": [{ "$id": "a" }, { "$id": "b" }] }"#;
        let list: DocumentList<Doc> = serde_json::from_str(json).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.documents[1].id, "b");
    }

    #[test]
    fn empty_document_list() {
        let json = r#"{ "total": 0, "documents": [] }"#;
        let list: DocumentList<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(list.total, 0);
        assert!(list.documents.is_empty());
    }

    // -- Live integration tests (require a configured backend) --

    #[tokio::test]
    #[ignore]
    async fn live_document_crud_roundtrip() {
        let client = live_client().expect("backend not configured — skipped via #[ignore]");
        let collection = client.config().files_collection_id.clone();

        let created: serde_json::Value = client
            .create_document(
                &collection,
                &json!({
                    "type": "other",
                    "name": "integration-test.bin",
                    "url": "https://example.com/view",
                    "extension": "bin",
                    "size": 1,
                    "owner": "integration-test",
                    "accountId": "integration-test",
                    "users": [],
                    "bucketFileId": "integration-test",
                }),
            )
            .await
            .unwrap();
        let id = created["$id"].as_str().unwrap().to_string();

        let list: DocumentList<serde_json::Value> = client
            .list_documents(&collection, &[Query::equal("owner", ["integration-test"])])
            .await
            .unwrap();
        assert!(list.total >= 1);

        let renamed: serde_json::Value = client
            .update_document(&collection, &id, &json!({ "name": "renamed.bin" }))
            .await
            .unwrap();
        assert_eq!(renamed["name"], "renamed.bin");

        client.delete_document(&collection, &id).await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn live_missing_document_is_not_found() {
        let client = live_client().expect("backend not configured — skipped via #[ignore]");
        let collection = client.config().files_collection_id.clone();
        let err = client
            .delete_document(&collection, "nonexistent-document-12345")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
