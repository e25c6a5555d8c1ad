use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::routes::crud::{self, invalid_field};
use crate::{
    AppState,
    error::AppError,
    models::{NewReview, Review, ReviewUpdate},
    store::Collection,
    utils::{ApiResponse, ack, success_to_api_response},
};

#[axum::debug_handler]
pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = crud::list(state.store.as_ref(), Collection::Reviews).await?;
    Ok(Json(reviews))
}

#[axum::debug_handler]
pub async fn create_review(
    State(state): State<AppState>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), AppError> {
    let Json(req) = payload?;
    let new = req.normalize().map_err(invalid_field)?;
    let review = crud::create(state.store.as_ref(), Collection::Reviews, &new).await?;
    Ok((
        StatusCode::CREATED,
        success_to_api_response("Review Added!", review),
    ))
}

#[axum::debug_handler]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReviewUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Review>>, AppError> {
    let Json(req) = payload?;
    let patch = req.normalize().map_err(invalid_field)?;
    let review = crud::update(state.store.as_ref(), Collection::Reviews, &id, &patch, "Review")
        .await?;
    Ok(success_to_api_response("Review Updated!", review))
}

#[axum::debug_handler]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    crud::delete(state.store.as_ref(), Collection::Reviews, &id, "Review").await?;
    Ok(ack("Review Deleted"))
}
