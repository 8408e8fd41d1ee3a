use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::services::auth::{authorize, ADMIN_COOKIE};
use crate::state::AppState;

/// Gate on every admin-prefixed route: a request without a valid session
/// cookie is redirected to the login page.
pub async fn admin_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let token = jar.get(ADMIN_COOKIE).map(|cookie| cookie.value().to_string());

    if authorize(token.as_deref(), state.sessions.as_ref()) {
        next.run(request).await
    } else {
        tracing::debug!("Admin request without valid session cookie, redirecting");
        Redirect::to("/admin/login").into_response()
    }
}
