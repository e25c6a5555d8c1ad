use serde::{Deserialize, Serialize};

use super::{optional, required, required_patch, trimmed_patch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: String,
    pub degree: String,
    pub institute: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewEducation {
    pub degree: String,
    pub institute: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EducationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewEducation {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            degree: required(self.degree, "degree")?,
            institute: required(self.institute, "institute")?,
            duration: required(self.duration, "duration")?,
            description: optional(self.description),
        })
    }
}

impl EducationUpdate {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            degree: required_patch(self.degree, "degree")?,
            institute: required_patch(self.institute, "institute")?,
            duration: required_patch(self.duration, "duration")?,
            description: trimmed_patch(self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let edu = NewEducation {
            degree: " BSCS ".into(),
            institute: " FAST ".into(),
            duration: "2020-2024 ".into(),
            description: Some("  ".into()),
        }
        .normalize()
        .unwrap();
        assert_eq!(edu.degree, "BSCS");
        assert_eq!(edu.institute, "FAST");
        assert_eq!(edu.duration, "2020-2024");
        assert_eq!(edu.description, None);
    }

    #[test]
    fn blank_patch_field_is_rejected() {
        let update = EducationUpdate {
            institute: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(update.normalize().unwrap_err(), "institute");
    }
}
