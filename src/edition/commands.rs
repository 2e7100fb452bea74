/// 에디션 관련 커맨드 처리
/// 1. 생성 (같은 식별자는 덮어쓰기)
/// 2. 부분 수정
/// 3. 삭제 (참조하는 소유자/입찰은 그대로 둔다)
// region:    --- Imports
use super::model::{Edition, EditionPatch, EditionStatus, NewEdition};
use crate::document_store::{to_fields, DocumentStore};
use crate::error::ApiError;
use crate::query::queries::EDITIONS;
use crate::{timestamp, validation};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands
/// 기본 경매 기간
const DEFAULT_AUCTION_DAYS: i64 = 7;

/// 1. 생성
pub async fn create_edition(
    store: &dyn DocumentStore,
    new: NewEdition,
) -> Result<Edition, ApiError> {
    let id = validation::required_id(new.id, "id")?;
    let name = validation::required_text(new.name, "name")?;
    let price = validation::non_negative(new.price.unwrap_or(0.0), "price")?;

    let now = timestamp::now();
    let auction_start_date = new.auction_start_date.unwrap_or(now);
    let auction_end_date = new
        .auction_end_date
        .unwrap_or_else(|| now + Duration::days(DEFAULT_AUCTION_DAYS));
    check_auction_window(auction_start_date, auction_end_date)?;

    let edition = Edition {
        id,
        name,
        description: new.description.unwrap_or_default(),
        image: new.image.unwrap_or_default(),
        status: new.status.unwrap_or(EditionStatus::Upcoming),
        price,
        auction_start_date,
        auction_end_date,
        created_at: now,
    };

    info!("{:<12} --> 에디션 저장 id: {}", "Command", edition.id);
    store
        .set(EDITIONS, &edition.id, to_fields(&edition)?)
        .await?;
    Ok(edition)
}

/// 2. 부분 수정
pub async fn update_edition(
    store: &dyn DocumentStore,
    id: &str,
    mut patch: EditionPatch,
) -> Result<Edition, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::validation("No updatable fields supplied"));
    }
    patch.name = validation::optional_text(patch.name, "name")?;
    if let Some(price) = patch.price {
        validation::non_negative(price, "price")?;
    }

    // 경매 기간을 바꾸면 저장된 값과 합쳐서 다시 검사
    if patch.auction_start_date.is_some() || patch.auction_end_date.is_some() {
        let current: Edition = store
            .get(EDITIONS, id)
            .await?
            .ok_or_else(|| ApiError::not_found("Edition not found"))?
            .into_record()?;
        let start = patch.auction_start_date.unwrap_or(current.auction_start_date);
        let end = patch.auction_end_date.unwrap_or(current.auction_end_date);
        check_auction_window(start, end)?;
    }

    info!("{:<12} --> 에디션 수정 id: {}", "Command", id);
    let document = store
        .update(EDITIONS, id, to_fields(&patch)?)
        .await
        .map_err(|e| ApiError::from_store(e, "Edition not found"))?;
    Ok(document.into_record()?)
}

/// 종료가 시작보다 앞설 수 없음
fn check_auction_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ApiError> {
    if end < start {
        return Err(ApiError::validation(
            "auctionEndDate must not be before auctionStartDate",
        ));
    }
    Ok(())
}

/// 3. 삭제
pub async fn delete_edition(store: &dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    info!("{:<12} --> 에디션 삭제 id: {}", "Command", id);
    store.delete(EDITIONS, id).await?;
    Ok(())
}

// endregion: --- Commands
