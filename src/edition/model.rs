use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 에디션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditionStatus {
    #[default]
    Upcoming,
    Active,
    Closed,
}

// 에디션 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub status: EditionStatus,
    pub price: f64,
    #[serde(with = "timestamp")]
    pub auction_start_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub auction_end_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// 에디션 생성 요청 (식별자는 호출자가 지정)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEdition {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: Option<EditionStatus>,
    pub price: Option<f64>,
    #[serde(default, with = "timestamp::option")]
    pub auction_start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub auction_end_date: Option<DateTime<Utc>>,
}

/// 에디션 부분 수정 요청. 허용된 필드 외에는 거부한다
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EditionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub auction_start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub auction_end_date: Option<DateTime<Utc>>,
}

impl EditionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.status.is_none()
            && self.price.is_none()
            && self.auction_start_date.is_none()
            && self.auction_end_date.is_none()
    }
}

// 숫자 식별자도 문자열로 받는다
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "id must be a string or a number, got {other}"
        ))),
    }
}
