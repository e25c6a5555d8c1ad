use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::routes::crud::{self, invalid_field};
use crate::{
    AppState,
    error::AppError,
    models::{NewProject, Project, ProjectUpdate},
    store::Collection,
    utils::{ApiResponse, ack, success_to_api_response},
};

#[axum::debug_handler]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = crud::list(state.store.as_ref(), Collection::Projects).await?;
    Ok(Json(projects))
}

#[axum::debug_handler]
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let Json(req) = payload?;
    let new = req.normalize().map_err(invalid_field)?;
    let project = crud::create(state.store.as_ref(), Collection::Projects, &new).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

#[axum::debug_handler]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let Json(req) = payload?;
    let patch = req.normalize().map_err(invalid_field)?;
    let project = crud::update(
        state.store.as_ref(),
        Collection::Projects,
        &id,
        &patch,
        "Project",
    )
    .await?;
    Ok(success_to_api_response("Project Updated!", project))
}

#[axum::debug_handler]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    crud::delete(state.store.as_ref(), Collection::Projects, &id, "Project").await?;
    Ok(ack("Project Deleted"))
}
