//! Draft repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MenuDraft, Visibility};
use crate::error::DomainError;

/// Store contract for menu drafts.
///
/// `upsert` replaces the whole record at `draft.id`, stamps `updated_at`, and
/// only sets `created_at` on the first write. `update_visibility` is the one
/// narrow patch; passing `None` keeps the stored artifact URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftRepository: Send + Sync {
    async fn upsert(&self, draft: &MenuDraft) -> Result<MenuDraft, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuDraft>, DomainError>;
    /// Unordered.
    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<MenuDraft>, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn update_visibility(
        &self,
        id: &Uuid,
        visibility: Visibility,
        artifact_url: Option<String>,
    ) -> Result<(), DomainError>;
}
