//! Reply workflow: send the reply email, then record it on the message.
//!
//! The email goes out before the message is updated. If the update then
//! fails, the recipient already has the reply while the stored message still
//! reads `Pending`; the error says so (`delivered()`), but nothing reconciles
//! the two. Re-running a reply re-sends the email.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::mail::{DeliveryError, Mailer, OutgoingMail};
use crate::models::message::{Message, MessageStatus, ReplyPatch, ReplyRequest};
use crate::store::{Collection, DocumentStore, StorageError, from_document, to_document};

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("missing required field: {0}")]
    InvalidRequest(&'static str),

    #[error("failed to deliver reply: {0}")]
    DeliveryFailed(#[source] DeliveryError),

    #[error("reply delivered but message {0} was not found")]
    NotFound(String),

    #[error("reply delivered but the message could not be updated: {0}")]
    Storage(#[source] StorageError),
}

impl ReplyError {
    /// Whether the email reached the transport before the failure.
    pub fn delivered(&self) -> bool {
        matches!(self, ReplyError::NotFound(_) | ReplyError::Storage(_))
    }
}

/// Validated reply input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl TryFrom<ReplyRequest> for Reply {
    type Error = ReplyError;

    fn try_from(req: ReplyRequest) -> Result<Self, Self::Error> {
        fn present(value: Option<String>, field: &'static str) -> Result<String, ReplyError> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(ReplyError::InvalidRequest(field))
        }

        Ok(Reply {
            message_id: present(req.id, "id")?,
            to: present(req.to, "to")?.trim().to_string(),
            subject: present(req.subject, "subject")?,
            body: present(req.message, "message")?,
        })
    }
}

pub struct ReplyWorkflow {
    store: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
    sender: String,
    send_timeout: Duration,
}

impl ReplyWorkflow {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        mailer: Arc<dyn Mailer>,
        sender: String,
        send_timeout: Duration,
    ) -> Self {
        Self {
            store,
            mailer,
            sender,
            send_timeout,
        }
    }

    pub async fn reply(&self, req: ReplyRequest) -> Result<Message, ReplyError> {
        let reply = Reply::try_from(req)?;

        self.deliver(&reply).await?;
        tracing::info!(message_id = %reply.message_id, to = %reply.to, "reply delivered");

        let patch = to_document(&ReplyPatch {
            status: MessageStatus::Replied,
            reply_text: &reply.body,
        })
        .map_err(ReplyError::Storage)?;

        let updated = self
            .store
            .update_by_id(Collection::Messages, &reply.message_id, patch)
            .await
            .map_err(|e| {
                tracing::error!(message_id = %reply.message_id, "reply sent but update failed: {}", e);
                ReplyError::Storage(e)
            })?
            .ok_or_else(|| {
                tracing::warn!(message_id = %reply.message_id, "reply sent for unknown message");
                ReplyError::NotFound(reply.message_id.clone())
            })?;

        from_document(updated).map_err(ReplyError::Storage)
    }

    async fn deliver(&self, reply: &Reply) -> Result<(), ReplyError> {
        let mail = OutgoingMail {
            from: self.sender.clone(),
            to: reply.to.clone(),
            subject: reply.subject.clone(),
            text: reply.body.clone(),
            reply_to: None,
        };

        match tokio::time::timeout(self.send_timeout, self.mailer.send(mail)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::error!(to = %reply.to, "reply delivery failed: {}", e);
                Err(ReplyError::DeliveryFailed(e))
            }
            Err(_) => {
                tracing::error!(to = %reply.to, "reply delivery timed out");
                Err(ReplyError::DeliveryFailed(DeliveryError::Timeout(
                    self.send_timeout.as_secs(),
                )))
            }
        }
    }
}
