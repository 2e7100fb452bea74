/// 관리자 인증
/// 프로세스 시작 시 주입된 공유 비밀 하나로 쓰기 요청을 보호한다.
// region:    --- Imports
use crate::error::ApiError;
use crate::routes::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use tracing::warn;

// endregion: --- Imports

// region:    --- Admin Auth
/// 관리자 토큰 검사기. 비밀 원문 대신 SHA-256 다이제스트만 보관한다
#[derive(Clone)]
pub struct AdminAuth {
    digest: [u8; 32],
}

impl AdminAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    /// 토큰이 관리자 비밀과 일치하는지 확인 (상수 시간 비교)
    pub fn is_authorized(&self, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };
        let candidate: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// `Authorization: Bearer <token>` 에서 토큰 추출
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

// endregion: --- Admin Auth

// region:    --- Extractor
/// 관리자 전용 핸들러에 붙이는 추출기. 본문 파싱 전에 실패한다
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.auth.is_authorized(bearer_token(&parts.headers)) {
            Ok(RequireAdmin)
        } else {
            warn!(
                "{:<12} --> 관리자 인증 실패: {} {}",
                "Auth", parts.method, parts.uri
            );
            Err(ApiError::Unauthorized)
        }
    }
}

// endregion: --- Extractor
