use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{AppState, error::AppError};

pub const ADMIN_COOKIE: &str = "adminToken";

/// Token from the session cookie, falling back to an `Authorization: Bearer`
/// header for non-browser clients.
fn session_token(jar: &CookieJar, req: &Request<Body>) -> Option<String> {
    jar.get(ADMIN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
        })
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar, &req);
    let claims = state.auth.authorize(token.as_deref())?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
