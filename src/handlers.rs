// region:    --- Imports
use crate::auth::RequireAdmin;
use crate::bidding::commands::{self as bid_commands, DecideBidCommand, PlaceBidCommand};
use crate::edition::commands as edition_commands;
use crate::edition::model::{EditionPatch, NewEdition};
use crate::error::ApiError;
use crate::owner::commands as owner_commands;
use crate::owner::model::{NewOwner, OwnerPatch};
use crate::query::{self, Page};
use crate::routes::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

// endregion: --- Imports

// region:    --- Edition Handlers

/// 에디션 목록
pub async fn handle_get_editions(
    State(state): State<AppState>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(page) = page?;
    info!("{:<12} --> 에디션 목록", "Handler");
    let editions =
        query::handlers::get_all_editions(state.store(), page.clamped(state.max_page_size))
            .await?;
    Ok(Json(editions))
}

/// 에디션 단건
pub async fn handle_get_edition(
    State(state): State<AppState>,
    Path(edition_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("{:<12} --> 에디션 조회 id: {}", "Handler", edition_id);
    match query::handlers::get_edition(state.store(), &edition_id).await? {
        Some(edition) => Ok(Json(edition)),
        None => Err(ApiError::not_found("Edition not found")),
    }
}

/// 에디션 생성 (관리자)
pub async fn handle_create_edition(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    body: Result<Json<NewEdition>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new) = body?;
    info!("{:<12} --> 에디션 생성 요청", "Handler");
    let edition = edition_commands::create_edition(state.store(), new).await?;
    Ok((StatusCode::CREATED, Json(edition)))
}

/// 에디션 수정 (관리자)
pub async fn handle_update_edition(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(edition_id): Path<String>,
    body: Result<Json<EditionPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(patch) = body?;
    let edition = edition_commands::update_edition(state.store(), &edition_id, patch).await?;
    Ok(Json(edition))
}

/// 에디션 삭제 (관리자)
pub async fn handle_delete_edition(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(edition_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    edition_commands::delete_edition(state.store(), &edition_id).await?;
    Ok(Json(json!({ "success": true, "id": edition_id })))
}

// endregion: --- Edition Handlers

// region:    --- Owner Handlers

/// 소유자 목록
pub async fn handle_get_owners(
    State(state): State<AppState>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(page) = page?;
    info!("{:<12} --> 소유자 목록", "Handler");
    let owners =
        query::handlers::get_all_owners(state.store(), page.clamped(state.max_page_size)).await?;
    Ok(Json(owners))
}

/// 소유자 등록 (관리자)
pub async fn handle_create_owner(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    body: Result<Json<NewOwner>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new) = body?;
    let owner = owner_commands::create_owner(state.store(), new).await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

/// 소유자 수정 (관리자)
pub async fn handle_update_owner(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    body: Result<Json<OwnerPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(patch) = body?;
    let owner = owner_commands::update_owner(state.store(), &owner_id, patch).await?;
    Ok(Json(owner))
}

/// 소유자 삭제 (관리자)
pub async fn handle_delete_owner(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    owner_commands::delete_owner(state.store(), &owner_id).await?;
    Ok(Json(json!({ "success": true, "id": owner_id })))
}

// endregion: --- Owner Handlers

// region:    --- Bid Handlers

/// 에디션 입찰 목록
pub async fn handle_get_edition_bids(
    State(state): State<AppState>,
    Path(edition_id): Path<String>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(page) = page?;
    let bids = query::handlers::get_edition_bids(
        state.store(),
        &edition_id,
        page.clamped(state.max_page_size),
    )
    .await?;
    Ok(Json(bids))
}

/// 입찰 (공개)
pub async fn handle_place_bid(
    State(state): State<AppState>,
    body: Result<Json<PlaceBidCommand>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(cmd) = body?;
    let bid = bid_commands::place_bid(state.store(), cmd).await?;
    Ok((StatusCode::CREATED, Json(bid)))
}

/// 입찰 수락/거절 (관리자)
pub async fn handle_decide_bid(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
    body: Result<Json<DecideBidCommand>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(cmd) = body?;
    let bid = bid_commands::decide_bid(state.store(), &bid_id, cmd).await?;
    Ok(Json(bid))
}

/// 입찰 삭제 (관리자)
pub async fn handle_delete_bid(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(bid_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    bid_commands::delete_bid(state.store(), &bid_id).await?;
    Ok(Json(json!({ "success": true, "id": bid_id })))
}

// endregion: --- Bid Handlers

// region:    --- Misc Handlers

/// 헬스 체크
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// 알 수 없는 경로
pub async fn handle_not_found() -> ApiError {
    ApiError::not_found("Not found")
}

// endregion: --- Misc Handlers
