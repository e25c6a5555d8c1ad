use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use super::{
    CREATED_AT_FIELD, Collection, Document, DocumentStore, Filter, ID_FIELD, Sort, SortOrder,
    StorageError, UPDATED_AT_FIELD, now_timestamp, strip_reserved,
};

/// All collections share one table; the JSONB body holds the document,
/// including its `_id` and timestamps.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY,
                collection TEXT NOT NULL,
                body JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS documents_collection_created_idx
            ON documents (collection, created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Ids that are not UUIDs cannot exist in the table.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StorageError> {
        let base = "SELECT body FROM documents WHERE collection = $1 AND body @> $2";

        let rows: Vec<Json<Document>> = match sort {
            None => {
                sqlx::query_scalar(base)
                    .bind(collection.as_str())
                    .bind(Json(filter.as_document()))
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(sort) if sort.field == CREATED_AT_FIELD => {
                let sql = format!("{} ORDER BY created_at {}", base, direction(sort.order));
                sqlx::query_scalar(&sql)
                    .bind(collection.as_str())
                    .bind(Json(filter.as_document()))
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(sort) => {
                let sql = format!("{} ORDER BY body -> $3 {}", base, direction(sort.order));
                sqlx::query_scalar(&sql)
                    .bind(collection.as_str())
                    .bind(Json(filter.as_document()))
                    .bind(&sort.field)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StorageError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let row: Option<Json<Document>> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.as_str())
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn create(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> Result<Document, StorageError> {
        strip_reserved(&mut doc);
        let id = Uuid::new_v4();
        let now = now_timestamp();
        doc.insert(ID_FIELD.into(), Value::String(id.to_string()));
        doc.insert(CREATED_AT_FIELD.into(), Value::String(now.clone()));
        doc.insert(UPDATED_AT_FIELD.into(), Value::String(now));

        let Json(stored): Json<Document> = sqlx::query_scalar(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            RETURNING body
            "#,
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(Json(&doc))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(collection = collection.as_str(), %id, "document created");
        Ok(stored)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        mut patch: Document,
    ) -> Result<Option<Document>, StorageError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        strip_reserved(&mut patch);
        patch.insert(UPDATED_AT_FIELD.into(), Value::String(now_timestamp()));

        let row: Option<Json<Document>> = sqlx::query_scalar(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(&patch))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StorageError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE collection = $1 AND body @> $2",
        )
        .bind(collection.as_str())
        .bind(Json(filter.as_document()))
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_uuid_ids_never_match() {
        assert!(parse_id("64f1c2e9a1b2c3d4e5f60718").is_none());
        assert!(parse_id("6f1c0b5e-7d0e-4a8e-9f3a-2b1c4d5e6f70").is_some());
    }

    #[test]
    fn sort_direction_keywords() {
        assert_eq!(direction(SortOrder::Ascending), "ASC");
        assert_eq!(direction(SortOrder::Descending), "DESC");
    }
}
