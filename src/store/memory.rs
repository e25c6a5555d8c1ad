use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CREATED_AT_FIELD, Collection, Document, DocumentStore, Filter, ID_FIELD, Sort, SortOrder,
    StorageError, UPDATED_AT_FIELD, now_timestamp, strip_reserved,
};

/// Process-local document store, lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = sort {
            docs.sort_by(|a, b| {
                let ordering = compare_field(a, b, &sort.field);
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        Ok(docs)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.get(ID_FIELD).and_then(Value::as_str) == Some(id))
                .cloned()
        }))
    }

    async fn create(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> Result<Document, StorageError> {
        strip_reserved(&mut doc);
        let now = now_timestamp();
        doc.insert(ID_FIELD.into(), Value::String(Uuid::new_v4().to_string()));
        doc.insert(CREATED_AT_FIELD.into(), Value::String(now.clone()));
        doc.insert(UPDATED_AT_FIELD.into(), Value::String(now));

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        mut patch: Document,
    ) -> Result<Option<Document>, StorageError> {
        strip_reserved(&mut patch);
        let mut collections = self.collections.write().await;
        let Some(doc) = collections.get_mut(&collection).and_then(|docs| {
            docs.iter_mut()
                .find(|d| d.get(ID_FIELD).and_then(Value::as_str) == Some(id))
        }) else {
            return Ok(None);
        };

        doc.extend(patch);
        doc.insert(UPDATED_AT_FIELD.into(), Value::String(now_timestamp()));
        Ok(Some(doc.clone()))
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StorageError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.get(ID_FIELD).and_then(Value::as_str) != Some(id));
        Ok(docs.len() != before)
    }

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }
}
