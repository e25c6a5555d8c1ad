use serde::{Deserialize, Serialize};

use super::{optional, required, required_patch, trimmed_patch};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceKind {
    #[default]
    Job,
    Internship,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: String,
    pub company: String,
    pub role: String,
    #[serde(rename = "type", default)]
    pub kind: ExperienceKind,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewExperience {
    pub company: String,
    pub role: String,
    #[serde(rename = "type", default)]
    pub kind: ExperienceKind,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExperienceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExperienceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewExperience {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            company: required(self.company, "company")?,
            role: required(self.role, "role")?,
            kind: self.kind,
            duration: required(self.duration, "duration")?,
            description: optional(self.description),
        })
    }
}

impl ExperienceUpdate {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            company: required_patch(self.company, "company")?,
            role: required_patch(self.role, "role")?,
            kind: self.kind,
            duration: required_patch(self.duration, "duration")?,
            description: trimmed_patch(self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_defaults_to_job() {
        let exp: NewExperience = serde_json::from_value(json!({
            "company": "Acme",
            "role": "Engineer",
            "duration": "2023"
        }))
        .unwrap();
        assert_eq!(exp.kind, ExperienceKind::Job);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<NewExperience, _> = serde_json::from_value(json!({
            "company": "Acme",
            "role": "Engineer",
            "type": "Freelance",
            "duration": "2023"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn update_trims_supplied_fields() {
        let update: ExperienceUpdate = serde_json::from_value(json!({
            "role": " Lead ",
            "description": "  Shipped things  "
        }))
        .unwrap();
        let update = update.normalize().unwrap();
        assert_eq!(update.role.as_deref(), Some("Lead"));
        assert_eq!(update.description.as_deref(), Some("Shipped things"));
        assert_eq!(update.company, None);
    }
}
