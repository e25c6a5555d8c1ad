use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/contact", post(routes::message::submit_contact))
        .route("/projects", get(routes::project::list_projects))
        .route("/education", get(routes::education::list_education))
        .route("/experience", get(routes::experience::list_experience))
        .route("/reviews", get(routes::review::list_reviews))
}

/// Every route here sits behind the admin session gate.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/check", get(routes::auth::check_session))
        // portfolio content
        .route("/projects", post(routes::project::create_project))
        .route(
            "/projects/{id}",
            put(routes::project::update_project).delete(routes::project::delete_project),
        )
        .route("/education", post(routes::education::create_education))
        .route(
            "/education/{id}",
            put(routes::education::update_education).delete(routes::education::delete_education),
        )
        .route("/experience", post(routes::experience::create_experience))
        .route(
            "/experience/{id}",
            put(routes::experience::update_experience)
                .delete(routes::experience::delete_experience),
        )
        .route("/reviews", post(routes::review::create_review))
        .route(
            "/reviews/{id}",
            put(routes::review::update_review).delete(routes::review::delete_review),
        )
        // inbox
        .route("/messages", get(routes::message::list_messages))
        .route("/messages/reply", post(routes::message::reply_to_message))
        .route("/messages/{id}", delete(routes::message::delete_message))
        .route("/dashboard-stats", get(routes::dashboard::dashboard_stats))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

pub fn create_router(state: AppState) -> Router {
    let api = public_routes().merge(protected_routes(state.clone()));

    let base = state.config.api_base_uri.trim_end_matches('/').to_string();
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&base, api)
    };

    router
        .route("/", get(|| async { "Portfolio API is Running..." }))
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
