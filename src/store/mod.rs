//! Document store collaborator.
//!
//! Every entity is persisted as a JSON document inside a named collection.
//! Documents always carry `_id`, `createdAt` and `updatedAt`; the store owns
//! those three fields and overwrites whatever the caller supplied.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Education,
    Experience,
    Reviews,
    Messages,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Education => "education",
            Collection::Experience => "experience",
            Collection::Reviews => "reviews",
            Collection::Messages => "messages",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("document is not a JSON object")]
    NotAnObject,
}

/// Equality filter over top-level document fields. An empty filter matches
/// everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    pub fn as_document(&self) -> &Document {
        &self.fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn newest_first() -> Self {
        Self {
            field: CREATED_AT_FIELD.to_string(),
            order: SortOrder::Descending,
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StorageError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StorageError>;

    /// Assigns `_id` and timestamps, stores the document and returns it.
    async fn create(&self, collection: Collection, doc: Document)
    -> Result<Document, StorageError>;

    /// Shallow-merges `patch` into the stored document. Returns `None` when
    /// no document has that id.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>, StorageError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StorageError>;

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StorageError>;
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes a value that must encode as a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StorageError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StorageError::NotAnObject),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StorageError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

/// Drops the store-owned fields from a caller-supplied document or patch.
pub(crate) fn strip_reserved(doc: &mut Document) {
    doc.remove(ID_FIELD);
    doc.remove(CREATED_AT_FIELD);
    doc.remove(UPDATED_AT_FIELD);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn filter_matches_on_every_field() {
        let message = doc(json!({"status": "Pending", "name": "Ana"}));
        assert!(Filter::all().matches(&message));
        assert!(Filter::all().eq("status", "Pending").matches(&message));
        assert!(
            !Filter::all()
                .eq("status", "Pending")
                .eq("name", "Bo")
                .matches(&message)
        );
        assert!(!Filter::all().eq("missing", "x").matches(&message));
    }

    #[test]
    fn to_document_rejects_non_objects() {
        assert!(matches!(to_document(&5), Err(StorageError::NotAnObject)));
        assert_eq!(to_document(&json!({"a": 1})).unwrap().len(), 1);
    }

    #[test]
    fn strip_reserved_removes_store_fields() {
        let mut d = doc(json!({"_id": "x", "createdAt": "t", "updatedAt": "t", "title": "T"}));
        strip_reserved(&mut d);
        assert_eq!(d, doc(json!({"title": "T"})));
    }
}
