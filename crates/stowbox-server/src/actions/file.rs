use bytes::Bytes;
use serde_json::json;
use stowbox_appwrite::{AppwriteClient, DocumentList, Query};
use stowbox_core::file::{
    CreateFileData, FileCategory, FileRecord, SortDirection, SortSpec, MAX_FILE_SIZE,
};
use stowbox_core::filetype;
use stowbox_core::usage::TotalSpace;
use stowbox_core::user::UserRecord;
use tracing::error;

use super::ActionError;

/// Listing filters, all optional. An empty category set lists everything
/// visible to the user.
#[derive(Debug, Clone, Default)]
pub struct ListFilesParams {
    pub categories: Vec<FileCategory>,
    pub search_text: Option<String>,
    pub sort: Option<SortSpec>,
    pub limit: Option<u64>,
}

/// Store the blob, then create its metadata document.
///
/// Two-step external transaction with a compensating action: when document
/// creation fails, the stored blob is deleted before the error propagates.
/// Not atomic: a crash between the two steps can still orphan the blob.
pub async fn upload_file(
    client: &AppwriteClient,
    data: Bytes,
    filename: &str,
    owner_id: &str,
    account_id: &str,
) -> Result<FileRecord, ActionError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(ActionError::InvalidInput(format!(
            "{filename} exceeds the {MAX_FILE_SIZE} byte upload limit"
        )));
    }

    let bucket_file = client.create_file(filename, data).await.map_err(|e| {
        error!(error = %e, "failed to store file blob");
        e
    })?;

    let kind = filetype::file_type(&bucket_file.name);
    let document = CreateFileData {
        category: kind.category,
        name: bucket_file.name.clone(),
        url: client.file_view_url(&bucket_file.id),
        extension: kind.extension,
        size: bucket_file.size_original,
        owner: owner_id.to_string(),
        account_id: account_id.to_string(),
        users: Vec::new(),
        bucket_file_id: bucket_file.id.clone(),
    };

    let collection = client.config().files_collection_id.clone();
    match client.create_document(&collection, &document).await {
        Ok(record) => Ok(record),
        Err(e) => {
            // Compensate so the blob does not orphan.
            if let Err(del) = client.delete_file(&bucket_file.id).await {
                error!(error = %del, "failed to delete blob after document creation failure");
            }
            error!(error = %e, "failed to create file document");
            Err(e.into())
        }
    }
}

/// Query operators for a listing: visibility (owned OR shared-with), then
/// the optional category/search/limit filters, then the sort order.
pub fn build_queries(user: &UserRecord, params: &ListFilesParams) -> Vec<Query> {
    let mut queries = vec![Query::or([
        Query::equal("owner", [user.id.as_str()]),
        Query::contains("users", [user.email.as_str()]),
    ])];

    if !params.categories.is_empty() {
        queries.push(Query::equal(
            "type",
            params.categories.iter().map(|c| c.as_str()),
        ));
    }
    if let Some(text) = params.search_text.as_deref().filter(|t| !t.is_empty()) {
        queries.push(Query::contains("name", [text]));
    }
    if let Some(limit) = params.limit {
        queries.push(Query::limit(limit));
    }

    let sort = params.sort.clone().unwrap_or_else(SortSpec::created_desc);
    queries.push(match sort.direction {
        SortDirection::Asc => Query::order_asc(&sort.field),
        SortDirection::Desc => Query::order_desc(&sort.field),
    });

    queries
}

/// List the files visible to a user. An empty result is a normal listing
/// with `total: 0`.
pub async fn get_files(
    client: &AppwriteClient,
    user: &UserRecord,
    params: &ListFilesParams,
) -> Result<DocumentList<FileRecord>, ActionError> {
    let collection = client.config().files_collection_id.clone();
    let queries = build_queries(user, params);
    client
        .list_documents(&collection, &queries)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to list files");
            e.into()
        })
}

/// Rename keeps the extension: the stored name becomes `{name}.{extension}`.
pub async fn rename_file(
    client: &AppwriteClient,
    file_id: &str,
    name: &str,
    extension: &str,
) -> Result<FileRecord, ActionError> {
    let collection = client.config().files_collection_id.clone();
    let new_name = format!("{name}.{extension}");
    client
        .update_document(&collection, file_id, &json!({ "name": new_name }))
        .await
        .map_err(|e| {
            error!(error = %e, "failed to rename file");
            e.into()
        })
}

/// Replace the shared-with email list.
pub async fn update_file_users(
    client: &AppwriteClient,
    file_id: &str,
    emails: &[String],
) -> Result<FileRecord, ActionError> {
    let collection = client.config().files_collection_id.clone();
    client
        .update_document(&collection, file_id, &json!({ "users": emails }))
        .await
        .map_err(|e| {
            error!(error = %e, "failed to update file shares");
            e.into()
        })
}

/// Remove the metadata document, then the blob. A blob-delete failure after
/// the document is gone is logged and propagated; the blob may orphan.
pub async fn delete_file(
    client: &AppwriteClient,
    file_id: &str,
    bucket_file_id: &str,
) -> Result<(), ActionError> {
    let collection = client.config().files_collection_id.clone();
    client
        .delete_document(&collection, file_id)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to delete file document");
            e
        })?;
    client.delete_file(bucket_file_id).await.map_err(|e| {
        error!(error = %e, "failed to delete blob for removed file");
        e
    })?;
    Ok(())
}

/// Aggregate the caller's own files into per-category totals.
pub async fn total_space_used(
    client: &AppwriteClient,
    user: &UserRecord,
) -> Result<TotalSpace, ActionError> {
    let collection = client.config().files_collection_id.clone();
    let list: DocumentList<FileRecord> = client
        .list_documents(&collection, &[Query::equal("owner", [user.id.as_str()])])
        .await
        .map_err(|e| {
            error!(error = %e, "failed to load files for usage aggregation");
            e
        })?;
    Ok(TotalSpace::from_files(&list.documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn test_user() -> UserRecord {
        UserRecord {
            id: "user-1".into(),
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            avatar: "https://example.com/avatar.png".into(),
            account_id: "acct-1".into(),
        }
    }

    fn wire(queries: &[Query]) -> Vec<Value> {
        queries
            .iter()
            .map(|q| serde_json::from_str(&q.to_wire()).unwrap())
            .collect()
    }

    #[test]
    fn queries_always_scope_to_owned_or_shared() {
        let queries = wire(&build_queries(&test_user(), &ListFilesParams::default()));
        assert_eq!(queries[0]["method"], "or");
        let operands = queries[0]["values"].as_array().unwrap();
        assert_eq!(operands[0]["attribute"], "owner");
        assert_eq!(operands[0]["values"][0], "user-1");
        assert_eq!(operands[1]["attribute"], "users");
        assert_eq!(operands[1]["values"][0], "ada@example.com");
    }

    #[test]
    fn default_listing_sorts_newest_first() {
        let queries = wire(&build_queries(&test_user(), &ListFilesParams::default()));
        // Visibility scope plus the default sort, nothing else.
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1]["method"], "orderDesc");
        assert_eq!(queries[1]["attribute"], "$createdAt");
    }

    #[test]
    fn category_filter_lists_every_requested_category() {
        let params = ListFilesParams {
            categories: vec![FileCategory::Video, FileCategory::Audio],
            ..Default::default()
        };
        let queries = wire(&build_queries(&test_user(), &params));
        let type_query = queries
            .iter()
            .find(|q| q["attribute"] == "type")
            .expect("type filter present");
        assert_eq!(type_query["method"], "equal");
        assert_eq!(type_query["values"], serde_json::json!(["video", "audio"]));
    }

    #[test]
    fn search_limit_and_sort_are_applied() {
        let params = ListFilesParams {
            categories: vec![],
            search_text: Some("report".into()),
            sort: Some(SortSpec::parse("name-asc")),
            limit: Some(25),
        };
        let queries = wire(&build_queries(&test_user(), &params));
        assert!(queries
            .iter()
            .any(|q| q["method"] == "contains" && q["attribute"] == "name"));
        assert!(queries
            .iter()
            .any(|q| q["method"] == "limit" && q["values"][0] == 25));
        let last = queries.last().unwrap();
        assert_eq!(last["method"], "orderAsc");
        assert_eq!(last["attribute"], "name");
    }

    #[test]
    fn empty_search_text_adds_no_filter() {
        let params = ListFilesParams {
            search_text: Some(String::new()),
            ..Default::default()
        };
        let queries = wire(&build_queries(&test_user(), &params));
        assert!(!queries.iter().any(|q| q["attribute"] == "name"));
    }
}
