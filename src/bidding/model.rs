use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 입찰 상태
/// pending -> accepted | rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

/// 관리자 결정 (수락/거절)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidDecision {
    Accepted,
    Rejected,
}

impl From<BidDecision> for BidStatus {
    fn from(decision: BidDecision) -> Self {
        match decision {
            BidDecision::Accepted => BidStatus::Accepted,
            BidDecision::Rejected => BidStatus::Rejected,
        }
    }
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub edition_id: String,
    pub bidder: String,
    pub email: String,
    pub amount: f64,
    pub status: BidStatus,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}
