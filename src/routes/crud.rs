//! Shared plumbing behind the per-entity handlers.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;
use crate::store::{
    Collection, DocumentStore, Filter, Sort, StorageError, from_document, to_document,
};

pub(crate) fn invalid_field(field: &'static str) -> AppError {
    AppError::InvalidRequest(format!("missing or invalid field: {}", field))
}

pub(crate) async fn list<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
) -> Result<Vec<T>, AppError> {
    let docs = store
        .find(collection, &Filter::all(), Some(&Sort::newest_first()))
        .await?;

    docs.into_iter()
        .map(from_document)
        .collect::<Result<Vec<T>, StorageError>>()
        .map_err(AppError::from)
}

pub(crate) async fn create<N: Serialize, T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    new: &N,
) -> Result<T, AppError> {
    let created = store.create(collection, to_document(new)?).await?;
    tracing::info!(collection = collection.as_str(), "document created");
    Ok(from_document(created)?)
}

pub(crate) async fn update<P: Serialize, T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    patch: &P,
    label: &str,
) -> Result<T, AppError> {
    let updated = store
        .update_by_id(collection, id, to_document(patch)?)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", label)))?;
    Ok(from_document(updated)?)
}

pub(crate) async fn delete(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    label: &str,
) -> Result<(), AppError> {
    if store.delete_by_id(collection, id).await? {
        tracing::info!(collection = collection.as_str(), %id, "document deleted");
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} not found", label)))
    }
}
