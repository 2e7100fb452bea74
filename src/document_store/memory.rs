/// 메모리 문서 저장소
/// 로컬 개발과 테스트용. 프로세스가 끝나면 내용도 사라진다.
// region:    --- Imports
use super::{Direction, Document, DocumentQuery, DocumentStore, Fields, StoreError};
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Memory Store
type Collection = HashMap<String, Fields>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 컬렉션 문서 수
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        debug!("{:<12} --> set {}/{}", "Store", collection, id);
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data.clone());
        Ok(Document::new(id, data))
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
        let mut collections = self.collections.write().await;
        let data = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        data.extend(patch);
        Ok(Document::new(id, data.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        debug!("{:<12} --> delete {}/{}", "Store", collection, id);
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Document> = docs
            .iter()
            .filter(|(_, data)| {
                query.filters.iter().all(|(field, expected)| {
                    data.get(field)
                        .is_some_and(|value| values_equal(value, expected))
                })
            })
            .map(|(id, data)| Document::new(id.as_str(), data.clone()))
            .collect();

        // 정렬 키가 같으면 식별자 순으로 고정
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some((field, direction)) = &query.order_by {
            matched.sort_by(|a, b| compare_field(a.data.get(field), b.data.get(field), *direction));
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(query.offset).take(limit).collect())
    }
}

// endregion: --- Memory Store

// region:    --- Value Ordering

/// 숫자는 수치로 비교 (1 == 1.0)
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// 필드가 없는 문서는 방향과 무관하게 뒤로 보낸다
fn compare_field(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            Direction::Ascending => compare_values(a, b),
            Direction::Descending => compare_values(b, a),
        },
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            // 타임스탬프는 정밀도가 달라도 시간 순서로 비교
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

// endregion: --- Value Ordering

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn set_overwrites_the_whole_document() {
        let store = MemoryDocumentStore::new();
        store
            .set("editions", "e1", fields(json!({"name": "a", "price": 5})))
            .await
            .unwrap();
        store
            .set("editions", "e1", fields(json!({"name": "b"})))
            .await
            .unwrap();

        let doc = store.get("editions", "e1").await.unwrap().unwrap();
        assert_eq!(doc.data, fields(json!({"name": "b"})));
        assert_eq!(store.len("editions").await, 1);
    }

    #[tokio::test]
    async fn update_merges_fields_and_requires_existing_document() {
        let store = MemoryDocumentStore::new();
        store
            .set("bids", "b1", fields(json!({"status": "pending", "amount": 10})))
            .await
            .unwrap();

        let doc = store
            .update("bids", "b1", fields(json!({"status": "accepted"})))
            .await
            .unwrap();
        assert_eq!(doc.data["status"], "accepted");
        assert_eq!(doc.data["amount"], 10);

        let err = store
            .update("bids", "missing", fields(json!({"status": "accepted"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_document_is_a_no_op() {
        let store = MemoryDocumentStore::new();
        store.delete("owners", "nobody").await.unwrap();
        store.add("owners", fields(json!({"name": "x"}))).await.unwrap();
        store.delete("owners", "nobody").await.unwrap();
        assert_eq!(store.len("owners").await, 1);
    }

    #[tokio::test]
    async fn add_generates_distinct_ids() {
        let store = MemoryDocumentStore::new();
        let a = store.add("bids", Fields::new()).await.unwrap();
        let b = store.add("bids", Fields::new()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn query_filters_orders_and_pages() {
        let store = MemoryDocumentStore::new();
        for (edition, amount) in [("e1", 10), ("e1", 30), ("e2", 99), ("e1", 20)] {
            store
                .add("bids", fields(json!({"editionId": edition, "amount": amount})))
                .await
                .unwrap();
        }

        let query = DocumentQuery::new()
            .where_eq("editionId", "e1")
            .order_by("amount", Direction::Descending);
        let amounts: Vec<Value> = store
            .query("bids", &query)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.data["amount"].clone())
            .collect();
        assert_eq!(amounts, vec![json!(30), json!(20), json!(10)]);

        let page = store
            .query("bids", &query.limit(Some(1)).offset(1))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].data["amount"], 20);
    }

    #[tokio::test]
    async fn query_on_unknown_collection_is_empty() {
        let store = MemoryDocumentStore::new();
        let docs = store.query("nothing", &DocumentQuery::new()).await.unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn timestamps_compare_chronologically_despite_precision() {
        let a = json!("2026-01-01T00:00:05Z");
        let b = json!("2026-01-01T00:00:05.100Z");
        assert_eq!(compare_values(&a, &b), Ordering::Less);
    }

    #[test]
    fn missing_sort_field_goes_last_in_both_directions() {
        let present = json!(1);
        for direction in [Direction::Ascending, Direction::Descending] {
            assert_eq!(
                compare_field(None, Some(&present), direction),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn numeric_equality_ignores_representation() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!("1"), &json!(1)));
    }
}
