use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState,
    error::AppError,
    models::MessageStatus,
    store::{Collection, Filter},
};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub projects: u64,
    pub messages: u64,
    pub pending: u64,
    pub experience: u64,
    pub reviews: u64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub stats: DashboardStats,
}

#[axum::debug_handler]
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let store = state.store.as_ref();
    let all = Filter::all();
    let pending_only = Filter::all().eq("status", MessageStatus::Pending.as_str());

    let (projects, messages, pending, experience, reviews) = tokio::try_join!(
        store.count_documents(Collection::Projects, &all),
        store.count_documents(Collection::Messages, &all),
        store.count_documents(Collection::Messages, &pending_only),
        store.count_documents(Collection::Experience, &all),
        store.count_documents(Collection::Reviews, &all),
    )?;

    Ok(Json(DashboardResponse {
        success: true,
        stats: DashboardStats {
            projects,
            messages,
            pending,
            experience,
            reviews,
        },
    }))
}
