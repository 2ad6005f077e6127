use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use stowbox_core::file::{SortSpec, MAX_FILE_SIZE};
use stowbox_core::{format, usage};

use super::{to_error, AppState};
use crate::actions::file::{self, ListFilesParams};
use crate::actions::ActionError;
use crate::session::CurrentUser;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/files", get(list_files).post(upload_file))
        .route("/api/files/usage", get(usage_summary))
        .route("/api/files/{id}/rename", patch(rename_file))
        .route("/api/files/{id}/users", patch(update_users))
        .route("/api/files/{id}", delete(delete_file))
        // Headroom over the upload cap for the multipart framing.
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 64 * 1024))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Browse segment: documents, images, media or others.
    #[serde(rename = "type")]
    segment: Option<String>,
    query: Option<String>,
    sort: Option<String>,
    limit: Option<u64>,
}

async fn list_files(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let params = ListFilesParams {
        categories: q
            .segment
            .as_deref()
            .map(|s| usage::categories_for_segment(s).to_vec())
            .unwrap_or_default(),
        search_text: q.query,
        sort: q.sort.as_deref().map(SortSpec::parse),
        limit: q.limit,
    };
    file::get_files(&state.client, &current.user, &params)
        .await
        .map(|list| Json(json!(list)))
        .map_err(to_error)
}

async fn upload_file(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| to_error(ActionError::InvalidInput("invalid multipart body".into())))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| to_error(ActionError::InvalidInput("failed to read upload".into())))?;

        let record = file::upload_file(
            &state.client,
            data,
            &filename,
            &current.user.id,
            &current.user.account_id,
        )
        .await
        .map_err(to_error)?;
        return Ok((StatusCode::CREATED, Json(json!(record))));
    }

    Err(to_error(ActionError::InvalidInput("no file part".into())))
}

#[derive(Debug, Deserialize)]
struct RenameRequest {
    name: String,
    extension: String,
}

async fn rename_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    file::rename_file(&state.client, &id, &req.name, &req.extension)
        .await
        .map(|record| Json(json!(record)))
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
struct ShareRequest {
    emails: Vec<String>,
}

async fn update_users(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ShareRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    file::update_file_users(&state.client, &id, &req.emails)
        .await
        .map(|record| Json(json!(record)))
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteQuery {
    bucket_file_id: String,
}

async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<DeleteQuery>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    file::delete_file(&state.client, &id, &q.bucket_file_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(to_error)
}

async fn usage_summary(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let total = file::total_space_used(&state.client, &current.user)
        .await
        .map_err(to_error)?;

    let sections: Vec<Value> = usage::usage_summary(&total)
        .iter()
        .map(|section| {
            let latest = section.latest_date.map(|d| d.to_rfc3339());
            json!({
                "title": section.title,
                "size": section.size,
                "formattedSize": format::file_size(section.size, None),
                "latestDate": section.latest_date,
                "latest": format::date_time(latest.as_deref()),
                "url": section.url,
            })
        })
        .collect();

    Ok(Json(json!({
        "totalSpace": total,
        "summary": sections,
        "used": format::file_size(total.used, None),
        "percentageUsed": usage::percentage_used(total.used),
    })))
}
