use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::routes::crud::{self, invalid_field};
use crate::{
    AppState,
    error::AppError,
    mail::OutgoingMail,
    models::{ContactRequest, Message, NewMessage, ReplyRequest},
    store::Collection,
    utils::{ApiResponse, ack, success_to_api_response},
};

#[axum::debug_handler]
pub async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    let messages = crud::list(state.store.as_ref(), Collection::Messages).await?;
    Ok(Json(messages))
}

#[axum::debug_handler]
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    crud::delete(state.store.as_ref(), Collection::Messages, &id, "Message").await?;
    Ok(ack("Message Deleted"))
}

#[axum::debug_handler]
pub async fn reply_to_message(
    State(state): State<AppState>,
    payload: Result<Json<ReplyRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Message>>, AppError> {
    let Json(req) = payload?;
    let message = state.replies.reply(req).await?;
    Ok(success_to_api_response(
        "Reply delivered and database updated!",
        message,
    ))
}

/// Public contact form. The message is stored first; the owner notification
/// is best effort and its failure does not fail the submission.
#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    let Json(req) = payload?;
    let new = req.normalize().map_err(invalid_field)?;

    let message: Message = crud::create(state.store.as_ref(), Collection::Messages, &new).await?;
    tracing::info!(message_id = %message.id, "contact message stored");

    notify_owner(&state, &new).await;

    Ok((StatusCode::CREATED, ack("Sent!")))
}

async fn notify_owner(state: &AppState, new: &NewMessage) {
    let owner = state.config.mail.owner_address();
    if owner.is_empty() {
        tracing::debug!("no owner inbox configured, skipping contact notification");
        return;
    }

    let mail = OutgoingMail {
        from: state.config.mail.sender(),
        to: owner.to_string(),
        subject: format!("New Message: {}", new.subject.as_deref().unwrap_or("(no subject)")),
        text: format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            new.name, new.email, new.message
        ),
        reply_to: Some(new.email.clone()),
    };

    match tokio::time::timeout(state.config.mail.timeout(), state.mailer.send(mail)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("contact notification failed: {}", e),
        Err(_) => tracing::warn!("contact notification timed out"),
    }
}
