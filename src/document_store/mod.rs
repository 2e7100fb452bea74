/// 문서 저장소
/// 컬렉션 단위로 JSON 문서(문자열 키 맵)를 보관하는 저장소 추상화.
/// 동시성 제어(원자성, 격리)는 전적으로 구현체에 위임한다.
// region:    --- Imports
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

// endregion: --- Modules

// region:    --- Document Model

/// 문서 본문
pub type Fields = serde_json::Map<String, Value>;

/// 저장소에 보관되는 문서 (식별자 + 본문)
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// `{ "id": ..., ...data }` 형태로 병합
    pub fn into_json(self) -> Value {
        let mut data = self.data;
        data.insert("id".to_string(), Value::String(self.id));
        Value::Object(data)
    }

    /// 타입이 있는 레코드로 변환
    pub fn into_record<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        let id = self.id.clone();
        serde_json::from_value(self.into_json())
            .map_err(|e| StoreError::InvalidDocument(format!("{id}: {e}")))
    }
}

/// 레코드를 문서 본문으로 변환 (`id`는 문서 키로 따로 관리하므로 제외)
pub fn to_fields<T: Serialize>(record: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

// endregion: --- Document Model

// region:    --- Query

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// 필드 동등 조건 + 정렬 + 페이지 조회
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

// endregion: --- Query

// region:    --- Errors

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// endregion: --- Errors

// region:    --- Document Store Trait

/// 문서 저장소 트레이트
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 단건 조회, 없으면 `None`
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// 지정한 식별자로 저장 (기존 문서는 통째로 덮어씀)
    async fn set(&self, collection: &str, id: &str, data: Fields)
        -> Result<Document, StoreError>;

    /// 식별자를 생성해 새 문서 추가
    async fn add(&self, collection: &str, data: Fields) -> Result<Document, StoreError>;

    /// 필드 단위 병합. 문서가 없으면 `StoreError::NotFound`
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Document, StoreError>;

    /// 삭제. 없는 문서 삭제는 아무 일도 하지 않는다
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError>;
}

// endregion: --- Document Store Trait
