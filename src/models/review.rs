use serde::{Deserialize, Serialize};

use super::{optional, required, required_patch, trimmed_patch};

pub const DEFAULT_RATING: u8 = 5;

fn default_rating() -> u8 {
    DEFAULT_RATING
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_role: Option<String>,
    pub review_text: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_role: Option<String>,
    pub review_text: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

fn check_rating(rating: u8) -> Result<u8, &'static str> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err("rating")
    }
}

impl NewReview {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            client_name: required(self.client_name, "clientName")?,
            client_role: optional(self.client_role),
            review_text: required(self.review_text, "reviewText")?,
            rating: check_rating(self.rating)?,
        })
    }
}

impl ReviewUpdate {
    pub fn normalize(self) -> Result<Self, &'static str> {
        Ok(Self {
            client_name: required_patch(self.client_name, "clientName")?,
            client_role: trimmed_patch(self.client_role),
            review_text: required_patch(self.review_text, "reviewText")?,
            rating: self.rating.map(check_rating).transpose()?,
        })
    }
}
