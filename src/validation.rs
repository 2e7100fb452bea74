/// 요청 필드 검증
use crate::error::ApiError;

/// 공백이 아닌 문자열 필수 필드
pub fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ApiError::validation(format!("Missing required field: {field}"))),
    }
}

/// 호출자가 정한 식별자. 공백만 아니면 주어진 그대로 사용
pub fn required_id(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::validation(format!("Missing required field: {field}"))),
    }
}

/// 패치용. 값이 주어졌다면 생성과 같은 규칙으로 다듬는다
pub fn optional_text(value: Option<String>, field: &str) -> Result<Option<String>, ApiError> {
    match value {
        Some(value) if value.trim().is_empty() => {
            Err(ApiError::validation(format!("Field must not be blank: {field}")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// 0 이상 유한수
pub fn non_negative(value: f64, field: &str) -> Result<f64, ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ApiError::validation(format!(
            "Field must be a non-negative number: {field}"
        )))
    }
}

/// 0 초과 유한수
pub fn positive(value: Option<f64>, field: &str) -> Result<f64, ApiError> {
    match value {
        Some(value) if value.is_finite() && value > 0.0 => Ok(value),
        Some(_) => Err(ApiError::validation(format!(
            "Field must be a positive number: {field}"
        ))),
        None => Err(ApiError::validation(format!("Missing required field: {field}"))),
    }
}
