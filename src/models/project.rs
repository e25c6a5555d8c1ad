use serde::{Deserialize, Deserializer, Serialize};

use super::{optional, required, required_patch, trimmed_patch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "tech_stack")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_tech_stack",
        skip_serializing_if = "Option::is_none"
    )]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl NewProject {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            image: optional(self.image),
            tech_stack: self.tech_stack,
            live_link: optional(self.live_link),
            github_link: optional(self.github_link),
            featured: self.featured,
        })
    }
}

impl ProjectUpdate {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            title: required_patch(self.title, "title")?,
            description: required_patch(self.description, "description")?,
            image: trimmed_patch(self.image),
            tech_stack: self.tech_stack,
            live_link: trimmed_patch(self.live_link),
            github_link: trimmed_patch(self.github_link),
            featured: self.featured,
        })
    }
}

/// The admin form posts the stack either as a list or as "a, b, c".
#[derive(Deserialize)]
#[serde(untagged)]
enum TechStackInput {
    List(Vec<String>),
    Csv(String),
}

impl From<TechStackInput> for Vec<String> {
    fn from(input: TechStackInput) -> Self {
        let items = match input {
            TechStackInput::List(items) => items,
            TechStackInput::Csv(raw) => raw.split(',').map(String::from).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn tech_stack<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(TechStackInput::deserialize(deserializer)?.into())
}

fn optional_tech_stack<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<TechStackInput>::deserialize(deserializer)?.map(Into::into))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tech_stack_accepts_list_or_comma_separated() {
        let from_csv: NewProject = serde_json::from_value(json!({
            "title": "Site",
            "description": "Portfolio",
            "techStack": "React, Node ,,Tailwind"
        }))
        .unwrap();
        assert_eq!(from_csv.tech_stack, vec!["React", "Node", "Tailwind"]);

        let from_list: NewProject = serde_json::from_value(json!({
            "title": "Site",
            "description": "Portfolio",
            "techStack": ["Rust", " axum "]
        }))
        .unwrap();
        assert_eq!(from_list.tech_stack, vec!["Rust", "axum"]);
    }

    #[test]
    fn missing_tech_stack_defaults_to_empty() {
        let project: NewProject =
            serde_json::from_value(json!({"title": "Site", "description": "Portfolio"})).unwrap();
        assert!(project.tech_stack.is_empty());
        assert!(!project.featured);
    }

    #[test]
    fn update_serializes_only_supplied_fields() {
        let update: ProjectUpdate =
            serde_json::from_value(json!({"techStack": "Go,Rust", "featured": true})).unwrap();
        let value = serde_json::to_value(update.normalize().unwrap()).unwrap();
        assert_eq!(value, json!({"techStack": ["Go", "Rust"], "featured": true}));
    }

    #[test]
    fn update_trims_links_and_image() {
        let update: ProjectUpdate = serde_json::from_value(json!({
            "image": " https://cdn.example.com/a.png ",
            "liveLink": "https://example.com  ",
            "githubLink": "  https://github.com/me/site"
        }))
        .unwrap();
        let value = serde_json::to_value(update.normalize().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "image": "https://cdn.example.com/a.png",
                "liveLink": "https://example.com",
                "githubLink": "https://github.com/me/site"
            })
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let project = NewProject {
            title: "  ".into(),
            description: "d".into(),
            image: None,
            tech_stack: vec![],
            live_link: None,
            github_link: None,
            featured: false,
        };
        assert_eq!(project.normalize().unwrap_err(), "title");
    }
}
