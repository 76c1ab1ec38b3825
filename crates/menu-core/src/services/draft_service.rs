// ============================================================================
// Menu Core - Draft Service
// File: crates/menu-core/src/services/draft_service.rs
// ============================================================================
//! Draft lifecycle outside the wizard: explicit creation, dashboard listing,
//! the single-menu view, visibility changes and deletion.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{require_owner, require_viewable, Subject};
use crate::domain::{MenuDraft, Visibility};
use crate::error::DomainError;
use crate::repositories::DraftRepository;

/// Dashboard ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSort {
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl DraftSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftSort::Newest => "newest",
            DraftSort::Oldest => "oldest",
            DraftSort::NameAsc => "name_asc",
            DraftSort::NameDesc => "name_desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(DraftSort::Newest),
            "oldest" => Some(DraftSort::Oldest),
            "name_asc" => Some(DraftSort::NameAsc),
            "name_desc" => Some(DraftSort::NameDesc),
            _ => None,
        }
    }

    fn compare(&self, a: &MenuDraft, b: &MenuDraft) -> Ordering {
        match self {
            DraftSort::Newest => b.created_at.cmp(&a.created_at),
            DraftSort::Oldest => a.created_at.cmp(&b.created_at),
            DraftSort::NameAsc => sort_name(a).cmp(&sort_name(b)),
            DraftSort::NameDesc => sort_name(b).cmp(&sort_name(a)),
        }
    }
}

impl Default for DraftSort {
    fn default() -> Self {
        DraftSort::Newest
    }
}

fn sort_name(draft: &MenuDraft) -> String {
    draft.name.as_deref().unwrap_or_default().to_lowercase()
}

/// Dashboard filter; `visibility: None` means every state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftQuery {
    pub visibility: Option<Visibility>,
    pub sort: DraftSort,
}

pub struct DraftService {
    drafts: Arc<dyn DraftRepository>,
}

impl DraftService {
    pub fn new(drafts: Arc<dyn DraftRepository>) -> Self {
        Self { drafts }
    }

    /// Persists an empty draft so the id and `created_at` exist before the wizard opens.
    pub async fn create_draft(&self, owner_id: &Uuid) -> Result<MenuDraft, DomainError> {
        let draft = MenuDraft::new(Uuid::new_v4(), *owner_id);
        let saved = self.drafts.upsert(&draft).await?;
        info!("Draft {} created for {}", saved.id, owner_id);
        Ok(saved)
    }

    pub async fn list(&self, owner_id: &Uuid, query: DraftQuery) -> Result<Vec<MenuDraft>, DomainError> {
        let mut drafts: Vec<MenuDraft> = self
            .drafts
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .filter(|d| query.visibility.map_or(true, |v| d.visibility == v))
            .collect();
        drafts.sort_by(|a, b| query.sort.compare(a, b));
        Ok(drafts)
    }

    /// Single-menu view. Missing and foreign drafts both end in `AccessDenied`.
    pub async fn view(&self, id: &Uuid, subject: &Subject) -> Result<MenuDraft, DomainError> {
        let draft = self.drafts.find_by_id(id).await?;
        require_viewable(draft, subject).inspect_err(|_| {
            warn!("Menu {} is not viewable by {:?}", id, subject);
        })
    }

    async fn owned(&self, id: &Uuid, user_id: &Uuid) -> Result<MenuDraft, DomainError> {
        let draft = self
            .drafts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::DraftNotFound(*id))?;
        require_owner(&draft, user_id)?;
        Ok(draft)
    }

    /// Status change only; the stored artifact URL is left alone. Going public
    /// needs a complete draft that already carries an artifact, so a first
    /// publish has to go through the Review step.
    pub async fn set_visibility(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        visibility: Visibility,
    ) -> Result<MenuDraft, DomainError> {
        let mut draft = self.owned(id, user_id).await?;
        if visibility == Visibility::Public {
            let mut errors = draft.publish_readiness();
            if draft.published_artifact_url.is_none() {
                errors.add("artifact", "Publish through the Review step first");
            }
            errors.into_result().inspect_err(|_| {
                warn!("Menu {} is not ready to be made public", id);
            })?;
        }
        self.drafts.update_visibility(id, visibility, None).await?;
        draft.visibility = visibility;
        info!("Menu {} visibility set to {}", id, visibility.as_str());
        Ok(draft)
    }

    pub async fn delete(&self, id: &Uuid, user_id: &Uuid) -> Result<(), DomainError> {
        self.owned(id, user_id).await?;
        self.drafts.delete(id).await?;
        info!("Menu {} deleted by {}", id, user_id);
        Ok(())
    }
}
