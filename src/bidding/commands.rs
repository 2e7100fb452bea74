/// 입찰 관련 커맨드 처리
/// 1. 입찰 (에디션이 active 상태일 때만)
/// 2. 수락/거절 (입찰 상태만 바꾸고 에디션/소유자는 건드리지 않음)
/// 3. 입찰 삭제
// region:    --- Imports
use super::model::{Bid, BidDecision, BidStatus};
use crate::document_store::{to_fields, DocumentStore, Fields, StoreError};
use crate::edition::model::{Edition, EditionStatus};
use crate::error::ApiError;
use crate::query::queries::{BIDS, EDITIONS};
use crate::{timestamp, validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidCommand {
    pub edition_id: Option<String>,
    pub bidder: Option<String>,
    pub email: Option<String>,
    pub amount: Option<f64>,
}

/// 수락/거절 명령
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct DecideBidCommand {
    pub status: BidDecision,
}

/// 1. 입찰
pub async fn place_bid(store: &dyn DocumentStore, cmd: PlaceBidCommand) -> Result<Bid, ApiError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd.edition_id);
    let edition_id = validation::required_id(cmd.edition_id, "editionId")?;
    let bidder = validation::required_text(cmd.bidder, "bidder")?;
    let email = validation::required_text(cmd.email, "email")?;
    let amount = validation::positive(cmd.amount, "amount")?;

    // 에디션 존재 및 상태 검증
    let edition = store
        .get(EDITIONS, &edition_id)
        .await?
        .map(|document| document.into_record::<Edition>())
        .transpose()?;
    if !edition.is_some_and(|e| e.status == EditionStatus::Active) {
        warn!(
            "{:<12} --> 입찰 불가 에디션 id: {}",
            "Command", edition_id
        );
        return Err(ApiError::validation("Edition not active for bidding"));
    }

    let mut bid = Bid {
        id: String::new(),
        edition_id,
        bidder,
        email,
        amount,
        status: BidStatus::Pending,
        timestamp: timestamp::now(),
    };
    let document = store.add(BIDS, to_fields(&bid)?).await?;
    bid.id = document.id;

    info!("{:<12} --> 입찰 접수 id: {}", "Command", bid.id);
    Ok(bid)
}

/// 2. 수락/거절
/// 이전 상태는 확인하지 않으므로 이미 결정된 입찰도 다시 결정할 수 있다
pub async fn decide_bid(
    store: &dyn DocumentStore,
    id: &str,
    cmd: DecideBidCommand,
) -> Result<Bid, ApiError> {
    let status = BidStatus::from(cmd.status);
    info!("{:<12} --> 입찰 상태 변경 id: {} -> {:?}", "Command", id, status);

    let mut patch = Fields::new();
    patch.insert(
        "status".to_string(),
        serde_json::to_value(status).map_err(StoreError::from)?,
    );
    let document = store
        .update(BIDS, id, patch)
        .await
        .map_err(|e| ApiError::from_store(e, "Bid not found"))?;
    Ok(document.into_record()?)
}

/// 3. 입찰 삭제
pub async fn delete_bid(store: &dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    info!("{:<12} --> 입찰 삭제 id: {}", "Command", id);
    store.delete(BIDS, id).await?;
    Ok(())
}

// endregion: --- Commands
