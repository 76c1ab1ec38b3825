// ============================================================================
// Menu API - Account Handlers
// File: crates/menu-api/src/handlers/account.rs
// ============================================================================

use axum::{extract::State, Json};
use menu_core::services::{AccountUpdate, UserInfo};

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /account
pub async fn get_account(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user_id = ctx.user_id()?;
    let user = state.accounts.get(&user_id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /api/account
pub async fn update_account(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(update): Json<AccountUpdate>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user_id = ctx.user_id()?;
    let user = state.accounts.update(&user_id, update).await?;
    Ok(Json(ApiResponse::success(user)))
}
