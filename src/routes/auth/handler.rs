use std::time::Duration;

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::AdminClaims,
    error::AppError,
    middleware::ADMIN_COOKIE,
    utils::{ApiResponse, ack, success_to_api_response},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub role: String,
    pub expires_at: i64,
}

/// Cross-site cookie: the admin frontend is served from another origin.
fn session_cookie(value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::seconds(max_age.as_secs() as i64))
        .build()
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiResponse<()>>), AppError> {
    let Json(req) = payload?;
    let session = state.auth.login(&req.password)?;

    let jar = jar.add(session_cookie(session.token, session.max_age));
    Ok((jar, ack("Logged in successfully!")))
}

#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    // Overwrite rather than `remove`: the jar only emits a removal for
    // cookies that arrived with the request.
    let jar = jar.add(session_cookie(String::new(), Duration::ZERO));
    (jar, ack("Logged out"))
}

/// Reaching this handler means the session passed the gate.
#[axum::debug_handler]
pub async fn check_session(
    Extension(claims): Extension<AdminClaims>,
) -> Json<ApiResponse<SessionInfo>> {
    success_to_api_response(
        "Session is valid",
        SessionInfo {
            role: claims.role,
            expires_at: claims.exp,
        },
    )
}
