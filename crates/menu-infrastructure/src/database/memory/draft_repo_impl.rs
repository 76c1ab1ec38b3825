// ============================================================================
// Menu Infrastructure - In-Memory Draft Repository
// File: crates/menu-infrastructure/src/database/memory/draft_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::{MenuDraft, Visibility};
use menu_core::error::DomainError;
use menu_core::repositories::DraftRepository;

/// Same upsert rules as the PostgreSQL adapter, held in a map.
#[derive(Default)]
pub struct MemoryDraftRepository {
    drafts: RwLock<HashMap<Uuid, MenuDraft>>,
}

impl MemoryDraftRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftRepository for MemoryDraftRepository {
    async fn upsert(&self, draft: &MenuDraft) -> Result<MenuDraft, DomainError> {
        let mut drafts = self.drafts.write().await;
        let now = Utc::now();

        let created_at = match drafts.get(&draft.id) {
            Some(existing) if existing.owner_id != draft.owner_id => {
                return Err(DomainError::AccessDenied);
            }
            Some(existing) => existing.created_at,
            None => Some(now),
        };

        let mut stored = draft.clone();
        stored.created_at = created_at;
        stored.updated_at = Some(now);
        drafts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuDraft>, DomainError> {
        Ok(self.drafts.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<MenuDraft>, DomainError> {
        Ok(self
            .drafts
            .read()
            .await
            .values()
            .filter(|d| d.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.drafts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(DomainError::DraftNotFound(*id))
    }

    async fn update_visibility(
        &self,
        id: &Uuid,
        visibility: Visibility,
        artifact_url: Option<String>,
    ) -> Result<(), DomainError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(id).ok_or(DomainError::DraftNotFound(*id))?;
        draft.visibility = visibility;
        if artifact_url.is_some() {
            draft.published_artifact_url = artifact_url;
        }
        draft.updated_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::Category;

    #[tokio::test]
    async fn test_upsert_keeps_created_at_and_id() {
        let repo = MemoryDraftRepository::new();
        let owner = Uuid::new_v4();
        let draft = MenuDraft::new(Uuid::new_v4(), owner);

        let first = repo.upsert(&draft).await.unwrap();
        let created_at = first.created_at;
        assert!(created_at.is_some());

        let mut edited = first.clone();
        edited.name = Some("Morning Menu".to_string());
        edited.created_at = None;
        let second = repo.upsert(&edited).await.unwrap();

        assert_eq!(second.id, draft.id);
        assert_eq!(second.created_at, created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_upsert_refuses_foreign_owner() {
        let repo = MemoryDraftRepository::new();
        let draft = MenuDraft::new(Uuid::new_v4(), Uuid::new_v4());
        repo.upsert(&draft).await.unwrap();

        let mut hijack = draft.clone();
        hijack.owner_id = Uuid::new_v4();
        assert!(matches!(repo.upsert(&hijack).await, Err(DomainError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_update_visibility_keeps_artifact_when_absent() {
        let repo = MemoryDraftRepository::new();
        let mut draft = MenuDraft::new(Uuid::new_v4(), Uuid::new_v4());
        draft.categories = vec![Category::new("Beverages").with_item("Latte", "50")];
        let created_at = repo.upsert(&draft).await.unwrap().created_at;
        assert!(created_at.is_some());

        repo.update_visibility(&draft.id, Visibility::Public, Some("https://cdn.test/qr.png".to_string()))
            .await
            .unwrap();
        repo.update_visibility(&draft.id, Visibility::Private, None)
            .await
            .unwrap();

        let stored = repo.find_by_id(&draft.id).await.unwrap().unwrap();
        assert_eq!(stored.visibility, Visibility::Private);
        assert_eq!(stored.published_artifact_url.as_deref(), Some("https://cdn.test/qr.png"));
        assert_eq!(stored.categories.len(), 1);
        assert_eq!(stored.created_at, created_at);
        assert!(stored.updated_at >= created_at);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let repo = MemoryDraftRepository::new();
        let id = Uuid::new_v4();
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert!(matches!(repo.delete(&id).await, Err(DomainError::DraftNotFound(_))));
        assert!(matches!(
            repo.update_visibility(&id, Visibility::Public, None).await,
            Err(DomainError::DraftNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_by_owner() {
        let repo = MemoryDraftRepository::new();
        let owner = Uuid::new_v4();
        repo.upsert(&MenuDraft::new(Uuid::new_v4(), owner)).await.unwrap();
        repo.upsert(&MenuDraft::new(Uuid::new_v4(), owner)).await.unwrap();
        repo.upsert(&MenuDraft::new(Uuid::new_v4(), Uuid::new_v4())).await.unwrap();

        assert_eq!(repo.list_by_owner(&owner).await.unwrap().len(), 2);
    }
}
