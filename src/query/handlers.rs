// region:    --- Imports
use super::{queries, Page};
use crate::bidding::model::Bid;
use crate::document_store::{Document, DocumentStore, StoreError};
use crate::edition::model::Edition;
use crate::owner::model::Owner;
use serde::de::DeserializeOwned;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 모든 에디션 조회
pub async fn get_all_editions(
    store: &dyn DocumentStore,
    page: Page,
) -> Result<Vec<Edition>, StoreError> {
    info!("{:<12} --> 모든 에디션 조회", "Query");
    let documents = store
        .query(queries::EDITIONS, &queries::all_editions(page))
        .await?;
    into_records(documents)
}

/// 에디션 조회
pub async fn get_edition(
    store: &dyn DocumentStore,
    edition_id: &str,
) -> Result<Option<Edition>, StoreError> {
    info!("{:<12} --> 에디션 조회 id: {}", "Query", edition_id);
    store
        .get(queries::EDITIONS, edition_id)
        .await?
        .map(Document::into_record)
        .transpose()
}

/// 모든 소유자 조회
pub async fn get_all_owners(
    store: &dyn DocumentStore,
    page: Page,
) -> Result<Vec<Owner>, StoreError> {
    info!("{:<12} --> 모든 소유자 조회", "Query");
    let documents = store
        .query(queries::OWNERS, &queries::all_owners(page))
        .await?;
    into_records(documents)
}

/// 에디션 입찰 조회
pub async fn get_edition_bids(
    store: &dyn DocumentStore,
    edition_id: &str,
    page: Page,
) -> Result<Vec<Bid>, StoreError> {
    info!("{:<12} --> 에디션 입찰 조회 id: {}", "Query", edition_id);
    let documents = store
        .query(queries::BIDS, &queries::edition_bids(edition_id, page))
        .await?;
    into_records(documents)
}

fn into_records<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>, StoreError> {
    documents.into_iter().map(Document::into_record).collect()
}

// endregion: --- Query Handlers

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::commands::{place_bid, PlaceBidCommand};
    use crate::document_store::MemoryDocumentStore;
    use crate::edition::commands::create_edition;
    use crate::owner::commands::create_owner;
    use serde_json::json;

    async fn seed_edition(store: &MemoryDocumentStore, id: &str, created_at: &str) {
        create_edition(
            store,
            serde_json::from_value(json!({"id": id, "name": id, "status": "active"})).unwrap(),
        )
        .await
        .unwrap();
        // 생성 시각을 고정해 정렬을 결정적으로 만든다
        let mut patch = crate::document_store::Fields::new();
        patch.insert("createdAt".to_string(), json!(created_at));
        store.update(queries::EDITIONS, id, patch).await.unwrap();
    }

    #[tokio::test]
    async fn editions_are_listed_newest_first() {
        let store = MemoryDocumentStore::new();
        seed_edition(&store, "old", "2026-01-01T00:00:00.000Z").await;
        seed_edition(&store, "new", "2026-03-01T00:00:00.000Z").await;
        seed_edition(&store, "mid", "2026-02-01T00:00:00.000Z").await;

        let ids: Vec<String> = get_all_editions(&store, Page::default())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn get_edition_returns_none_when_missing() {
        let store = MemoryDocumentStore::new();
        assert!(get_edition(&store, "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn owners_are_listed_by_acquired_date() {
        let store = MemoryDocumentStore::new();
        for (name, date) in [("first", "2024-01-01"), ("latest", "2025-06-01")] {
            create_owner(
                &store,
                serde_json::from_value(json!({"name": name, "acquiredDate": date})).unwrap(),
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = get_all_owners(&store, Page::default())
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["latest", "first"]);
    }

    #[tokio::test]
    async fn edition_bids_are_filtered_and_ordered_by_amount() {
        let store = MemoryDocumentStore::new();
        seed_edition(&store, "e1", "2026-01-01T00:00:00.000Z").await;
        seed_edition(&store, "e2", "2026-01-02T00:00:00.000Z").await;
        for (edition_id, amount) in [("e1", 100.0), ("e2", 999.0), ("e1", 300.0), ("e1", 200.0)] {
            place_bid(
                &store,
                PlaceBidCommand {
                    edition_id: Some(edition_id.to_string()),
                    bidder: Some("Ada".to_string()),
                    email: Some("ada@example.com".to_string()),
                    amount: Some(amount),
                },
            )
            .await
            .unwrap();
        }

        let amounts: Vec<f64> = get_edition_bids(&store, "e1", Page::default())
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.amount)
            .collect();
        assert_eq!(amounts, vec![300.0, 200.0, 100.0]);

        let page = Page {
            limit: Some(2),
            offset: Some(1),
        };
        let amounts: Vec<f64> = get_edition_bids(&store, "e1", page)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.amount)
            .collect();
        assert_eq!(amounts, vec![200.0, 100.0]);
    }
}
