/// 타임스탬프 직렬화
/// 문자열 비교만으로도 시간 순서가 유지되도록 RFC 3339(UTC, 밀리초)로 고정한다.
// region:    --- Imports
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

// endregion: --- Imports

// region:    --- Format

/// 현재 시각 (밀리초 단위 절삭)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// 저장 형식으로 변환
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// RFC 3339 또는 `YYYY-MM-DD` 파싱
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(3));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{raw}': expected RFC 3339 or YYYY-MM-DD"))
}

// endregion: --- Format

// region:    --- Serde

pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

/// `Option<DateTime<Utc>>` 필드용
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.serialize_some(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

// endregion: --- Serde

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn format_uses_fixed_millisecond_precision() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format(&ts), "2026-01-02T03:04:05.000Z");
    }

    #[test]
    fn parse_accepts_bare_dates_as_midnight_utc() {
        let ts = parse("2025-12-24").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 12, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_normalises_offsets_to_utc() {
        let ts = parse("2026-03-01T09:00:00+09:00").unwrap();
        assert_eq!(format(&ts), "2026-03-01T00:00:00.000Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse("next tuesday").unwrap_err();
        assert!(err.contains("next tuesday"));
    }

    #[test]
    fn lexical_order_matches_chronological_order() {
        let early = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 5).unwrap();
        let late = early + Duration::milliseconds(100);
        assert!(format(&early) < format(&late));
    }
}
