pub mod handlers;
pub mod queries;

use serde::Deserialize;

/// 목록 조회 페이지 (`?limit=&offset=`)
/// limit이 없으면 전체를 돌려준다
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl Page {
    /// limit을 최대 페이지 크기로 제한
    pub fn clamped(self, max_page_size: usize) -> Self {
        Self {
            limit: self.limit.map(|limit| limit.min(max_page_size)),
            offset: self.offset,
        }
    }
}
