// ============================================================================
// Menu Core - Wizard Service
// File: crates/menu-core/src/services/wizard_service.rs
// ============================================================================
//! Branding → Content → Review flow over a single draft record.
//!
//! Every step loads the stored draft, merges the step's validated fields into
//! it and writes the whole record back. Uploads run before the write and a
//! failed upload stops the step before anything is persisted.

use std::sync::Arc;

use menu_shared::utils::{share_link, wizard_location};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::require_owner;
use crate::domain::{Brand, Category, MenuDraft, Visibility};
use crate::error::DomainError;
use crate::ports::{AssetHost, AssetUpload};
use crate::repositories::DraftRepository;
use crate::wizard::{BrandingForm, ContentForm, PublishForm, WizardStep};

/// What a wizard step renders with, pre-populated from the stored draft.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub id: Uuid,
    pub step: WizardStep,
    pub step_number: u8,
    pub brand: Brand,
    pub name: Option<String>,
    pub categories: Vec<Category>,
    /// Preselected visibility on the Review step.
    pub visibility: Visibility,
    pub published_artifact_url: Option<String>,
    pub share_link: String,
    pub persisted: bool,
}

/// Result of a successful step submission.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub draft: MenuDraft,
    pub next_step: WizardStep,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub draft: MenuDraft,
    pub share_link: String,
    /// `false` when a stored artifact was reused.
    pub artifact_uploaded: bool,
}

pub struct WizardService {
    drafts: Arc<dyn DraftRepository>,
    assets: Arc<dyn AssetHost>,
    public_base_url: String,
}

impl WizardService {
    pub fn new(
        drafts: Arc<dyn DraftRepository>,
        assets: Arc<dyn AssetHost>,
        public_base_url: &str,
    ) -> Self {
        Self {
            drafts,
            assets,
            public_base_url: public_base_url.to_string(),
        }
    }

    /// Loads the draft for the wizard. A foreign draft is denied; a missing one
    /// is fine and pins the view to Branding.
    async fn load_for(&self, id: &Uuid, user_id: &Uuid) -> Result<Option<MenuDraft>, DomainError> {
        let draft = self.drafts.find_by_id(id).await?;
        if let Some(ref draft) = draft {
            require_owner(draft, user_id).inspect_err(|_| {
                warn!("Wizard access denied: menu {} is not owned by {}", id, user_id);
            })?;
        }
        Ok(draft)
    }

    pub async fn step_view(
        &self,
        id: &Uuid,
        step: WizardStep,
        user_id: &Uuid,
    ) -> Result<WizardView, DomainError> {
        let draft = self.load_for(id, user_id).await?;

        let step = if draft.is_some() { step } else { WizardStep::Branding };
        let persisted = draft.is_some();
        let draft = draft.unwrap_or_else(|| MenuDraft::new(*id, *user_id));

        let visibility = if draft.published_artifact_url.is_some() {
            draft.visibility
        } else {
            Visibility::Public
        };

        Ok(WizardView {
            id: draft.id,
            step,
            step_number: step.number(),
            share_link: share_link(&self.public_base_url, &draft.id),
            brand: draft.brand,
            name: draft.name,
            categories: draft.categories,
            visibility,
            published_artifact_url: draft.published_artifact_url,
            persisted,
        })
    }

    /// Step 1. Creates the draft on first submit when no record exists yet.
    pub async fn submit_branding(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        form: BrandingForm,
        logo: Option<AssetUpload>,
    ) -> Result<StepOutcome, DomainError> {
        info!("Branding submit for menu {}", id);

        // 1. Load and check ownership
        let existing = self.load_for(id, user_id).await?;
        let has_stored_logo = existing.as_ref().is_some_and(MenuDraft::has_logo);

        // 2. Validate before touching the asset host or the store
        form.check(logo.as_ref(), has_stored_logo)?;

        // 3. Upload a new logo, or keep the stored one
        let logo_url = match logo.filter(|upload| !upload.is_empty()) {
            Some(upload) => Some(self.assets.upload(upload).await?),
            None => None,
        };

        // 4. Merge into the last known shape
        let mut draft = existing.unwrap_or_else(|| MenuDraft::new(*id, *user_id));
        draft.brand.primary_color = form.primary_color;
        draft.brand.accent_color = form.accent_color;
        if logo_url.is_some() {
            draft.brand.logo_url = logo_url;
        }

        // 5. Full-record write
        let saved = self.drafts.upsert(&draft).await?;

        Ok(self.advance(saved, WizardStep::Branding))
    }

    /// Step 2. Needs a draft that already went through Branding.
    pub async fn submit_content(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        form: ContentForm,
    ) -> Result<StepOutcome, DomainError> {
        info!("Content submit for menu {}", id);

        let existing = self.load_for(id, user_id).await?;
        let form = form.trimmed();
        form.check()?;

        let mut draft = match existing {
            Some(draft) if draft.has_logo() => draft,
            _ => return Err(DomainError::field("logo", "Logo is required")),
        };
        draft.name = Some(form.name);
        draft.categories = form.categories;

        let saved = self.drafts.upsert(&draft).await?;

        Ok(self.advance(saved, WizardStep::Content))
    }

    /// Step 3. For a public target, uploads the artifact (when one is given)
    /// and then patches visibility and artifact URL. A public target without
    /// any artifact is rejected; a stored artifact is reused when no new one
    /// comes in. Other targets only change the status and never upload.
    pub async fn publish(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        form: PublishForm,
        artifact: Option<AssetUpload>,
    ) -> Result<PublishOutcome, DomainError> {
        info!("Publish requested for menu {}", id);

        // 1. Draft must exist, be ours, and be complete
        let mut draft = self
            .load_for(id, user_id)
            .await?
            .ok_or(DomainError::DraftNotFound(*id))?;
        draft.publish_readiness().into_result()?;

        // 2. Target state
        let visibility = form.target_visibility()?;
        let artifact = artifact
            .filter(|upload| !upload.is_empty())
            .filter(|_| visibility == Visibility::Public);
        if visibility == Visibility::Public
            && artifact.is_none()
            && draft.published_artifact_url.is_none()
        {
            return Err(DomainError::field("artifact", "QR artifact is required to publish"));
        }

        // 3. Upload first; a failure leaves the draft untouched
        let uploaded_url = match artifact {
            Some(upload) => Some(self.assets.upload(upload).await?),
            None => None,
        };
        let artifact_uploaded = uploaded_url.is_some();

        // 4. Narrow visibility patch
        self.drafts
            .update_visibility(id, visibility, uploaded_url.clone())
            .await?;

        draft.visibility = visibility;
        if uploaded_url.is_some() {
            draft.published_artifact_url = uploaded_url;
        }

        info!("Menu {} is now {}", id, visibility.as_str());

        Ok(PublishOutcome {
            share_link: share_link(&self.public_base_url, &draft.id),
            draft,
            artifact_uploaded,
        })
    }

    fn advance(&self, draft: MenuDraft, from: WizardStep) -> StepOutcome {
        let next_step = from.next().unwrap_or(WizardStep::Review);
        StepOutcome {
            location: wizard_location(&draft.id, next_step.number()),
            draft,
            next_step,
        }
    }
}
