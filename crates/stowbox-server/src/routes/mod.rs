pub mod auth;
pub mod files;
pub mod health;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use stowbox_appwrite::AppwriteClient;
use tower_http::cors::CorsLayer;

use crate::actions::ActionError;
use crate::session::session_middleware;

pub struct InnerAppState {
    pub client: AppwriteClient,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(client: AppwriteClient) -> Router {
    let state: AppState = Arc::new(InnerAppState { client });

    let public = Router::new().merge(health::routes()).merge(auth::routes());

    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(files::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    public
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) fn to_error(e: ActionError) -> (StatusCode, Json<Value>) {
    let status = match &e {
        ActionError::NotFound(_) => StatusCode::NOT_FOUND,
        ActionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ActionError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ActionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use stowbox_appwrite::AppwriteConfig;
    use tower::ServiceExt;

    fn test_router() -> Router {
        // Router construction needs no live backend; the middleware rejects
        // cookieless requests before any call goes out.
        let config = AppwriteConfig {
            endpoint: "https://cloud.appwrite.io/v1".into(),
            project_id: "proj".into(),
            api_key: "key".into(),
            database_id: "db".into(),
            users_collection_id: "users".into(),
            files_collection_id: "files".into(),
            bucket_id: "bucket".into(),
        };
        build_router(AppwriteClient::new(config))
    }

    #[tokio::test]
    async fn health_is_public() {
        let resp = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn file_listing_requires_a_session() {
        let resp = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/files")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn current_user_requires_a_session() {
        let resp = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn usage_requires_a_session() {
        let resp = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/files/usage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn action_errors_map_to_statuses() {
        let (status, _) = to_error(ActionError::NotFound("x".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = to_error(ActionError::InvalidInput("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = to_error(ActionError::Unauthorized("x".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, body) = to_error(ActionError::Internal("boom".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["error"], "internal error: boom");
    }
}
