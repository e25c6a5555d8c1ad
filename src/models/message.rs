use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    #[default]
    Pending,
    Replied,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "Pending",
            MessageStatus::Replied => "Replied",
        }
    }
}

/// A contact form submission as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_text: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// Fields written when a contact request is accepted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub status: MessageStatus,
}

impl ContactRequest {
    /// Trims fields and lower-cases the address. Returns the name of the
    /// first required field that is blank.
    pub fn normalize(self) -> Result<NewMessage, &'static str> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_lowercase();
        let message = self.message.trim().to_string();

        if name.is_empty() {
            return Err("name");
        }
        if email.is_empty() {
            return Err("email");
        }
        if message.is_empty() {
            return Err("message");
        }

        Ok(NewMessage {
            name,
            email,
            subject: self
                .subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            message,
            status: MessageStatus::Pending,
        })
    }
}

/// Body of `POST /messages/reply`. Every field is optional at the decoding
/// layer so that absence is reported by the workflow itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReplyPatch<'a> {
    pub status: MessageStatus,
    pub reply_text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_request_is_normalized() {
        let msg = ContactRequest {
            name: "  Ana ".into(),
            email: " Ana@Example.COM ".into(),
            subject: Some("   ".into()),
            message: " Hello ".into(),
        }
        .normalize()
        .unwrap();

        assert_eq!(msg.name, "Ana");
        assert_eq!(msg.email, "ana@example.com");
        assert_eq!(msg.subject, None);
        assert_eq!(msg.message, "Hello");
        assert_eq!(msg.status, MessageStatus::Pending);
    }

    #[test]
    fn contact_request_requires_body() {
        let err = ContactRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: None,
            message: "  ".into(),
        }
        .normalize()
        .unwrap_err();
        assert_eq!(err, "message");
    }

    #[test]
    fn stored_message_defaults_to_pending() {
        let msg: Message = serde_json::from_value(serde_json::json!({
            "_id": "m1",
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Hello",
            "createdAt": "2026-01-01T00:00:00.000Z",
            "updatedAt": "2026-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(msg.status, MessageStatus::Pending);
        assert_eq!(msg.reply_text, None);

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["status"], "Pending");
        assert!(value.get("replyText").is_none());
    }
}
