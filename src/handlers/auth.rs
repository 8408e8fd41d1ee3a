use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::{json, Value};
use time::Duration;

use crate::errors::{FormResult, Result};
use crate::services::auth::{ADMIN_COOKIE, SESSION_DAYS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Shared-password login. A correct password sets the http-only session
/// cookie with a fixed 7-day expiry; a wrong one returns a failure result and
/// sets nothing.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<FormResult>)> {
    if !state.credentials.verify(&payload.password) {
        tracing::warn!("Failed admin login attempt");
        return Ok((jar, Json(FormResult::failure("Incorrect password"))));
    }

    let cookie = Cookie::build((ADMIN_COOKIE, state.sessions.issue()))
        .path("/")
        .http_only(true)
        .max_age(Duration::days(SESSION_DAYS))
        .build();

    tracing::info!("Admin logged in");
    Ok((jar.add(cookie), Json(FormResult::ok("Logged in"))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<FormResult>) {
    let removal = Cookie::build(ADMIN_COOKIE).path("/").build();
    (jar.remove(removal), Json(FormResult::ok("Logged out")))
}

/// Redirect target for ungated admin requests.
pub async fn login_required() -> Json<Value> {
    Json(json!({
        "message": "Admin login required",
        "login": "/admin/login",
    }))
}
