use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::routes::crud::{self, invalid_field};
use crate::{
    AppState,
    error::AppError,
    models::{Education, EducationUpdate, NewEducation},
    store::Collection,
    utils::{ApiResponse, ack, success_to_api_response},
};

#[axum::debug_handler]
pub async fn list_education(
    State(state): State<AppState>,
) -> Result<Json<Vec<Education>>, AppError> {
    let entries = crud::list(state.store.as_ref(), Collection::Education).await?;
    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn create_education(
    State(state): State<AppState>,
    payload: Result<Json<NewEducation>, JsonRejection>,
) -> Result<(StatusCode, Json<Education>), AppError> {
    let Json(req) = payload?;
    let new = req.normalize().map_err(invalid_field)?;
    let entry = crud::create(state.store.as_ref(), Collection::Education, &new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[axum::debug_handler]
pub async fn update_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EducationUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Education>>, AppError> {
    let Json(req) = payload?;
    let patch = req.normalize().map_err(invalid_field)?;
    let entry = crud::update(
        state.store.as_ref(),
        Collection::Education,
        &id,
        &patch,
        "Education",
    )
    .await?;
    Ok(success_to_api_response("Education Updated!", entry))
}

#[axum::debug_handler]
pub async fn delete_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    crud::delete(state.store.as_ref(), Collection::Education, &id, "Education").await?;
    Ok(ack("Education Deleted"))
}
