/// Postgres 문서 저장소
/// `documents(collection, id, data JSONB)` 테이블 하나에 모든 컬렉션을 보관한다.
// region:    --- Imports
use super::{Direction, Document, DocumentQuery, DocumentStore, Fields, StoreError};
use crate::database::DatabaseManager;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Statements

/// 문서 조회
const GET_DOCUMENT: &str = "SELECT id, data FROM documents WHERE collection = $1 AND id = $2";

/// 문서 저장 (덮어쓰기)
const UPSERT_DOCUMENT: &str = r#"
    INSERT INTO documents (collection, id, data)
    VALUES ($1, $2, $3)
    ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
    RETURNING id, data
"#;

/// 문서 필드 병합
const MERGE_DOCUMENT: &str = r#"
    UPDATE documents SET data = data || $3
    WHERE collection = $1 AND id = $2
    RETURNING id, data
"#;

/// 문서 삭제
const DELETE_DOCUMENT: &str = "DELETE FROM documents WHERE collection = $1 AND id = $2";

// endregion: --- Statements

// region:    --- Postgres Store
#[derive(FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.data.0)
    }
}

pub struct PostgresDocumentStore {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresDocumentStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(GET_DOCUMENT)
            .bind(collection)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(row.map(Document::from))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        debug!("{:<12} --> set {}/{}", "Store", collection, id);
        let row = sqlx::query_as::<_, DocumentRow>(UPSERT_DOCUMENT)
            .bind(collection)
            .bind(id)
            .bind(Json(data))
            .fetch_one(self.db_manager.pool())
            .await?;
        Ok(row.into())
    }

    async fn add(&self, collection: &str, data: Fields) -> Result<Document, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        self.set(collection, &id, data).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Document, StoreError> {
        debug!("{:<12} --> update {}/{}", "Store", collection, id);
        sqlx::query_as::<_, DocumentRow>(MERGE_DOCUMENT)
            .bind(collection)
            .bind(id)
            .bind(Json(patch))
            .fetch_optional(self.db_manager.pool())
            .await?
            .map(Document::from)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        debug!("{:<12} --> delete {}/{}", "Store", collection, id);
        sqlx::query(DELETE_DOCUMENT)
            .bind(collection)
            .bind(id)
            .execute(self.db_manager.pool())
            .await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let mut builder = build_select(collection, query);
        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }
}

/// 조회 쿼리 조립
fn build_select(collection: &str, query: &DocumentQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::<Postgres>::new("SELECT id, data FROM documents WHERE collection = ");
    builder.push_bind(collection.to_string());

    for (field, value) in &query.filters {
        builder.push(" AND data -> ");
        builder.push_bind(field.clone());
        builder.push(" = ");
        builder.push_bind(Json(value.clone()));
    }

    // jsonb 비교: 숫자는 수치, 문자열은 사전순. 필드가 없으면 마지막
    builder.push(" ORDER BY ");
    if let Some((field, direction)) = &query.order_by {
        builder.push("data -> ");
        builder.push_bind(field.clone());
        builder.push(match direction {
            Direction::Ascending => " ASC NULLS LAST, ",
            Direction::Descending => " DESC NULLS LAST, ",
        });
    }
    builder.push("id ASC");

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ");
        builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    }
    if query.offset > 0 {
        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(query.offset).unwrap_or(i64::MAX));
    }
    builder
}

// endregion: --- Postgres Store

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_for_plain_collection_orders_by_id() {
        let builder = build_select("owners", &DocumentQuery::new());
        assert_eq!(
            builder.sql(),
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY id ASC"
        );
    }

    #[test]
    fn select_binds_filters_ordering_and_paging() {
        let query = DocumentQuery::new()
            .where_eq("editionId", "e1")
            .order_by("amount", Direction::Descending)
            .limit(Some(10))
            .offset(20);
        let builder = build_select("bids", &query);
        assert_eq!(
            builder.sql(),
            "SELECT id, data FROM documents WHERE collection = $1 \
             AND data -> $2 = $3 \
             ORDER BY data -> $4 DESC NULLS LAST, id ASC LIMIT $5 OFFSET $6"
        );
    }
}
