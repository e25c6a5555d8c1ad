use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::routes::crud::{self, invalid_field};
use crate::{
    AppState,
    error::AppError,
    models::{Experience, ExperienceUpdate, NewExperience},
    store::Collection,
    utils::{ApiResponse, ack, success_to_api_response},
};

#[axum::debug_handler]
pub async fn list_experience(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let entries = crud::list(state.store.as_ref(), Collection::Experience).await?;
    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn create_experience(
    State(state): State<AppState>,
    payload: Result<Json<NewExperience>, JsonRejection>,
) -> Result<(StatusCode, Json<Experience>), AppError> {
    let Json(req) = payload?;
    let new = req.normalize().map_err(invalid_field)?;
    let entry = crud::create(state.store.as_ref(), Collection::Experience, &new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[axum::debug_handler]
pub async fn update_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ExperienceUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Experience>>, AppError> {
    let Json(req) = payload?;
    let patch = req.normalize().map_err(invalid_field)?;
    let entry = crud::update(
        state.store.as_ref(),
        Collection::Experience,
        &id,
        &patch,
        "Experience",
    )
    .await?;
    Ok(success_to_api_response("Experience Updated!", entry))
}

#[axum::debug_handler]
pub async fn delete_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    crud::delete(state.store.as_ref(), Collection::Experience, &id, "Experience").await?;
    Ok(ack("Experience Deleted"))
}
