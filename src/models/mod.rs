//! Persisted portfolio entities and their request bodies.

pub mod education;
pub mod experience;
pub mod message;
pub mod project;
pub mod review;

pub use education::{Education, EducationUpdate, NewEducation};
pub use experience::{Experience, ExperienceKind, ExperienceUpdate, NewExperience};
pub use message::{ContactRequest, Message, MessageStatus, NewMessage, ReplyRequest};
pub use project::{NewProject, Project, ProjectUpdate};
pub use review::{NewReview, Review, ReviewUpdate};

/// Trims a required field, failing with the field name when it is blank.
pub(crate) fn required(value: String, field: &'static str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(field)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trims an optional field, collapsing blank values to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`required`] for patch fields: absent is fine, blank is not.
pub(crate) fn required_patch(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, &'static str> {
    value.map(|v| required(v, field)).transpose()
}

/// Trims an optional patch field. A supplied blank value clears the field.
pub(crate) fn trimmed_patch(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
