use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 소유자 모델 (명예의 전당)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub name: String,
    /// 에디션 이름
    pub edition: String,
    pub edition_id: String,
    #[serde(with = "timestamp")]
    pub acquired_date: DateTime<Utc>,
    pub image: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// 소유자 등록 요청
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub name: Option<String>,
    pub edition: Option<String>,
    pub edition_id: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub acquired_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// 소유자 부분 수정 요청
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OwnerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition_id: Option<String>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub acquired_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OwnerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.edition.is_none()
            && self.edition_id.is_none()
            && self.acquired_date.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }
}
