/// 소유자 관련 커맨드 처리
/// editionId가 실제 에디션을 가리키는지는 검사하지 않는다.
// region:    --- Imports
use super::model::{NewOwner, Owner, OwnerPatch};
use crate::document_store::{to_fields, DocumentStore};
use crate::error::ApiError;
use crate::query::queries::OWNERS;
use crate::{timestamp, validation};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 소유자 등록 (식별자는 저장소가 생성)
pub async fn create_owner(store: &dyn DocumentStore, new: NewOwner) -> Result<Owner, ApiError> {
    let name = validation::required_text(new.name, "name")?;
    let now = timestamp::now();

    let mut owner = Owner {
        id: String::new(),
        name,
        edition: new.edition.unwrap_or_default(),
        edition_id: new.edition_id.unwrap_or_default(),
        acquired_date: new.acquired_date.unwrap_or(now),
        image: new.image.unwrap_or_default(),
        description: new.description.unwrap_or_default(),
        created_at: now,
    };

    let document = store.add(OWNERS, to_fields(&owner)?).await?;
    owner.id = document.id;
    info!("{:<12} --> 소유자 등록 id: {}", "Command", owner.id);
    Ok(owner)
}

/// 소유자 부분 수정
pub async fn update_owner(
    store: &dyn DocumentStore,
    id: &str,
    mut patch: OwnerPatch,
) -> Result<Owner, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::validation("No updatable fields supplied"));
    }
    patch.name = validation::optional_text(patch.name, "name")?;

    info!("{:<12} --> 소유자 수정 id: {}", "Command", id);
    let document = store
        .update(OWNERS, id, to_fields(&patch)?)
        .await
        .map_err(|e| ApiError::from_store(e, "Owner not found"))?;
    Ok(document.into_record()?)
}

/// 소유자 삭제. 없는 식별자도 성공으로 처리
pub async fn delete_owner(store: &dyn DocumentStore, id: &str) -> Result<(), ApiError> {
    info!("{:<12} --> 소유자 삭제 id: {}", "Command", id);
    store.delete(OWNERS, id).await?;
    Ok(())
}

// endregion: --- Commands
