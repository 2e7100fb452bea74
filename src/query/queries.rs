use super::Page;
use crate::document_store::{Direction, DocumentQuery};

/// 컬렉션 이름
pub const EDITIONS: &str = "editions";
pub const OWNERS: &str = "owners";
pub const BIDS: &str = "bids";

/// 모든 에디션 (최신 생성순)
pub fn all_editions(page: Page) -> DocumentQuery {
    DocumentQuery::new()
        .order_by("createdAt", Direction::Descending)
        .limit(page.limit)
        .offset(page.offset.unwrap_or(0))
}

/// 모든 소유자 (최근 취득순)
pub fn all_owners(page: Page) -> DocumentQuery {
    DocumentQuery::new()
        .order_by("acquiredDate", Direction::Descending)
        .limit(page.limit)
        .offset(page.offset.unwrap_or(0))
}

/// 에디션 입찰 (높은 금액순)
pub fn edition_bids(edition_id: &str, page: Page) -> DocumentQuery {
    DocumentQuery::new()
        .where_eq("editionId", edition_id)
        .order_by("amount", Direction::Descending)
        .limit(page.limit)
        .offset(page.offset.unwrap_or(0))
}
