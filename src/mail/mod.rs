//! Outbound mail transport collaborator.

use async_trait::async_trait;
use thiserror::Error;

pub mod smtp;

pub use smtp::SmtpMailer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("mail transport timed out after {0}s")]
    Timeout(u64),

    #[error("mail transport rejected the message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DeliveryError>;
}
