use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::reply::ReplyError;
use crate::store::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Deliberately carries no detail: a missing token and a bad token must
    /// produce the same response.
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("server configuration missing: {0}")]
    Configuration(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Reply(#[from] ReplyError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<bool>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Reply(e) => match e {
                ReplyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ReplyError::NotFound(_) => StatusCode::NOT_FOUND,
                ReplyError::DeliveryFailed(_) | ReplyError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized => "Unauthorized".into(),
            AppError::Configuration(_) => "Server configuration missing".into(),
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".into(),
            AppError::Reply(ReplyError::DeliveryFailed(_)) => {
                "Failed to send email. The message was not updated.".into()
            }
            AppError::Reply(ReplyError::NotFound(_)) => {
                "Reply was sent, but the message ID was not found in the database.".into()
            }
            AppError::Reply(ReplyError::Storage(_)) => {
                "Reply was sent, but the message could not be updated.".into()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let delivered = match &self {
            AppError::Reply(e @ (ReplyError::DeliveryFailed(_)
            | ReplyError::NotFound(_)
            | ReplyError::Storage(_))) => Some(e.delivered()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            success: false,
            message: self.public_message(),
            delivered,
        });

        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => AppError::Unauthorized,
            AuthError::NotConfigured(var) => AppError::Configuration(var.to_string()),
            AuthError::TokenIssue(e) => AppError::Internal(e.to_string()),
            AuthError::PasswordHash(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
