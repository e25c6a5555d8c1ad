use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::{DeliveryError, Mailer, OutgoingMail};
use crate::config::MailConfig;

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds a STARTTLS relay transport. No connection is opened until the
    /// first send.
    pub fn new(config: &MailConfig) -> Result<Self, DeliveryError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self { transport })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .parse()
        .map_err(|_| DeliveryError::InvalidAddress(address.to_string()))
}

pub(crate) fn build_message(mail: &OutgoingMail) -> Result<Message, DeliveryError> {
    let mut builder = Message::builder()
        .from(mailbox(&mail.from)?)
        .to(mailbox(&mail.to)?)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN);

    if let Some(reply_to) = &mail.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    Ok(builder.body(mail.text.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DeliveryError> {
        let message = build_message(&mail)?;
        let response = self.transport.send(message).await?;

        if !response.is_positive() {
            return Err(DeliveryError::Rejected(response.code().to_string()));
        }

        tracing::info!(to = %mail.to, subject = %mail.subject, "email sent");
        Ok(())
    }
}
