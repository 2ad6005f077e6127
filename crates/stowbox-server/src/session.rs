use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use stowbox_core::user::UserRecord;

use crate::actions::user as user_actions;
use crate::routes::AppState;

/// Cookie holding the backend session secret.
pub const SESSION_COOKIE: &str = "stowbox-session";

/// The signed-in user for this request, injected by [`session_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserRecord,
    pub session_secret: String,
}

/// Axum middleware guarding the protected routes.
///
/// A missing cookie is rejected without touching the backend; a present one
/// is resolved to the user document and stored in request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "not signed in" })),
        )
            .into_response();
    };

    let session_secret = cookie.value().to_string();
    match user_actions::current_user(&state.client, &session_secret).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser {
                user,
                session_secret,
            });
            next.run(request).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "session expired or invalid" })),
        )
            .into_response(),
    }
}
