// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menus.rs
// ============================================================================
//! Dashboard, explicit draft creation, visibility, deletion and the public view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use menu_core::domain::{Brand, Category, MenuDraft, Visibility};
use menu_core::services::{DraftQuery, DraftSort};
use menu_shared::utils::{share_link, wizard_location};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub visibility: Option<String>,
    pub sort: Option<String>,
}

impl DashboardQuery {
    /// Unknown values fall back to "all" and "newest".
    fn into_query(self) -> DraftQuery {
        DraftQuery {
            visibility: self.visibility.as_deref().and_then(Visibility::from_str),
            sort: self
                .sort
                .as_deref()
                .and_then(DraftSort::from_str)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visibility: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedDraft {
    pub id: Uuid,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardEntry {
    pub id: Uuid,
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub visibility: Visibility,
    pub published_artifact_url: Option<String>,
    pub share_link: String,
    pub edit_location: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub visibility: Option<Visibility>,
    pub sort: &'static str,
    pub menus: Vec<DashboardEntry>,
}

/// Public rendering of a menu; owner id and timestamps stay internal.
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub id: Uuid,
    pub name: Option<String>,
    pub brand: Brand,
    pub categories: Vec<Category>,
    pub visibility: Visibility,
    pub is_owner: bool,
}

fn dashboard_entry(state: &AppState, draft: MenuDraft) -> DashboardEntry {
    DashboardEntry {
        share_link: share_link(&state.config.app.public_base_url, &draft.id),
        edit_location: wizard_location(&draft.id, 1),
        id: draft.id,
        name: draft.name,
        logo_url: draft.brand.logo_url,
        visibility: draft.visibility,
        published_artifact_url: draft.published_artifact_url,
        created_at: draft.created_at.map(|t| t.to_rfc3339()),
        updated_at: draft.updated_at.map(|t| t.to_rfc3339()),
    }
}

fn parse_menu_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::NotFound(format!("Menu {} not found", raw)))
}

/// GET /designs
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let user_id = ctx.user_id()?;
    let query = query.into_query();

    let drafts = state.drafts.list(&user_id, query).await?;
    let menus = drafts
        .into_iter()
        .map(|draft| dashboard_entry(&state, draft))
        .collect();

    Ok(Json(ApiResponse::success(Dashboard {
        visibility: query.visibility,
        sort: query.sort.as_str(),
        menus,
    })))
}

/// POST /api/menus
pub async fn create_draft(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<(StatusCode, Json<ApiResponse<CreatedDraft>>), ApiError> {
    let user_id = ctx.user_id()?;
    let draft = state.drafts.create_draft(&user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedDraft {
            location: wizard_location(&draft.id, 1),
            id: draft.id,
        })),
    ))
}

/// PATCH /api/menus/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<VisibilityRequest>,
) -> Result<Json<ApiResponse<DashboardEntry>>, ApiError> {
    let user_id = ctx.user_id()?;
    let id = parse_menu_id(&id)?;
    let visibility = Visibility::from_str(&payload.visibility)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown visibility: {}", payload.visibility)))?;

    let draft = state.drafts.set_visibility(&id, &user_id, visibility).await?;
    Ok(Json(ApiResponse::success(dashboard_entry(&state, draft))))
}

/// DELETE /api/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = ctx.user_id()?;
    let id = parse_menu_id(&id)?;

    state.drafts.delete(&id, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /menu/{id}. Anything other than a viewable draft redirects home.
pub async fn view_menu(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MenuView>>, ApiError> {
    let id = Uuid::parse_str(id.trim()).map_err(|_| ApiError::AccessDenied)?;
    let draft = state.drafts.view(&id, &ctx.subject).await?;
    let is_owner = ctx.subject.user_id().is_some_and(|user| draft.is_owned_by(&user));

    Ok(Json(ApiResponse::success(MenuView {
        id: draft.id,
        name: draft.name,
        brand: draft.brand,
        categories: draft.categories,
        visibility: draft.visibility,
        is_owner,
    })))
}
