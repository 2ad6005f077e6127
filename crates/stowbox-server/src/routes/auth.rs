use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{to_error, AppState};
use crate::actions::user;
use crate::session::{CurrentUser, SESSION_COOKIE};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/auth/sign-in", post(sign_in))
        .route("/api/auth/otp", post(resend_otp))
        .route("/api/auth/verify", post(verify))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/sign-out", post(sign_out))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest {
    full_name: String,
    email: String,
}

async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    user::create_account(&state.client, &req.full_name, &req.email)
        .await
        .map(|account_id| Json(json!({ "accountId": account_id })))
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
struct EmailRequest {
    email: String,
}

async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    user::sign_in(&state.client, &req.email)
        .await
        .map(|account_id| Json(json!({ "accountId": account_id })))
        .map_err(to_error)
}

async fn resend_otp(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    user::send_email_otp(&state.client, &req.email)
        .await
        .map(|account_id| Json(json!({ "accountId": account_id })))
        .map_err(to_error)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest {
    account_id: String,
    password: String,
}

async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<VerifyRequest>,
) -> Result<(CookieJar, Json<Value>), (StatusCode, Json<Value>)> {
    let session = user::verify_otp(&state.client, &req.account_id, &req.password)
        .await
        .map_err(to_error)?;

    let cookie = Cookie::build((SESSION_COOKIE, session.secret.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    Ok((jar.add(cookie), Json(json!({ "sessionId": session.id }))))
}

async fn me(Extension(current): Extension<CurrentUser>) -> Json<Value> {
    Json(json!(current.user))
}

async fn sign_out(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), (StatusCode, Json<Value>)> {
    user::sign_out(&state.client, &current.session_secret)
        .await
        .map_err(to_error)?;
    // The removal cookie must carry the same path the session cookie was
    // set with.
    let removal = Cookie::build(SESSION_COOKIE).path("/");
    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}
