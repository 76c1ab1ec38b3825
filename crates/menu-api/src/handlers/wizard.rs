// ============================================================================
// Menu API - Wizard Handlers
// File: crates/menu-api/src/handlers/wizard.rs
// ============================================================================
//! `/menus/create` flow addressed by `id` and `step` query parameters.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use menu_core::services::{PublishOutcome, StepOutcome, WizardView};
use menu_core::wizard::{BrandingForm, ContentForm, PublishForm, WizardStep};
use serde::Deserialize;
use uuid::Uuid;

use super::multipart::MultipartForm;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WizardQuery {
    pub id: Option<String>,
    pub step: Option<String>,
}

impl WizardQuery {
    fn draft_id(&self) -> Result<Uuid, ApiError> {
        self.id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or_else(|| ApiError::BadRequest("A valid menu id is required".to_string()))
    }
}

/// GET /menus/create?id&step
pub async fn step_view(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<WizardQuery>,
) -> Result<Json<ApiResponse<WizardView>>, ApiError> {
    let user_id = ctx.user_id()?;
    let id = query.draft_id()?;
    let step = WizardStep::parse(query.step.as_deref());

    let view = state.wizard.step_view(&id, step, &user_id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// POST /menus/create/branding?id (multipart: primary_color, accent_color, logo)
pub async fn submit_branding(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<WizardQuery>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<StepOutcome>>, ApiError> {
    let user_id = ctx.user_id()?;
    let id = query.draft_id()?;

    let mut form = MultipartForm::read(multipart).await?;
    let branding = BrandingForm::new(
        form.text("primary_color").unwrap_or_default(),
        form.text("accent_color").unwrap_or_default(),
    );
    let logo = form.take_file("logo");

    let outcome = state
        .wizard
        .submit_branding(&id, &user_id, branding, logo)
        .await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /menus/create/content?id (JSON)
pub async fn submit_content(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<WizardQuery>,
    Json(form): Json<ContentForm>,
) -> Result<Json<ApiResponse<StepOutcome>>, ApiError> {
    let user_id = ctx.user_id()?;
    let id = query.draft_id()?;

    let outcome = state.wizard.submit_content(&id, &user_id, form).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /menus/create/publish?id (multipart: visibility, artifact)
pub async fn publish(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<WizardQuery>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PublishOutcome>>, ApiError> {
    let user_id = ctx.user_id()?;
    let id = query.draft_id()?;

    let mut form = MultipartForm::read(multipart).await?;
    let publish = PublishForm {
        visibility: form.text("visibility").map(str::to_string),
    };
    let artifact = form.take_file("artifact");

    let outcome = state.wizard.publish(&id, &user_id, publish, artifact).await?;
    Ok(Json(ApiResponse::success(outcome)))
}
