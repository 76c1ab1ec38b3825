// ============================================================================
// Menu API - Auth Handlers
// File: crates/menu-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, logout, Google sign-in)

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Json,
};
use menu_core::services::{LoginResult, UserInfo};
use menu_security::csrf::{generate_state_token, validate_state_token};
use menu_security::session::read_cookie;
use menu_shared::constants::{DASHBOARD_PATH, SIGN_IN_PATH};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Register request payload. Fields are optional so a missing one is a 400,
/// not a body rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub access_token: String,
    pub expires_in: i64,
}

impl From<LoginResult> for AuthResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: result.user,
            access_token: result.access_token,
            expires_in: result.expires_in,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let user = state
        .auth
        .register(
            payload.name.as_deref().unwrap_or_default(),
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RegisterResponse {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let result = state.auth.login(&payload.email, &payload.password).await?;
    let cookie = state.session_cookie.issue(&result.access_token);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::success(AuthResponse::from(result))),
    )
        .into_response())
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, state.session_cookie.clear())]),
        Json(ApiResponse::success(())),
    )
        .into_response()
}

/// GET /api/auth/google
pub async fn google_start(State(state): State<AppState>) -> Result<Response, ApiError> {
    let provider = state
        .identity
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Google sign-in is not configured".to_string()))?;

    let csrf_state = generate_state_token();
    let location = provider.authorization_url(&csrf_state);

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.oauth_state_cookie.issue(&csrf_state))]),
        Redirect::to(&location),
    )
        .into_response())
}

fn sign_in_failed(state: &AppState, reason: &str) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, state.oauth_state_cookie.clear())]),
        Redirect::to(&format!("{}?error={}", SIGN_IN_PATH, reason)),
    )
        .into_response()
}

/// GET /api/auth/google/callback
pub async fn google_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<Response, ApiError> {
    let provider = state
        .identity
        .clone()
        .ok_or_else(|| ApiError::NotFound("Google sign-in is not configured".to_string()))?;

    if let Some(error) = query.error.as_deref() {
        warn!("Google sign-in cancelled: {}", error);
        return Ok(sign_in_failed(&state, "OAuthCallback"));
    }

    let expected = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| read_cookie(value, state.oauth_state_cookie.name()))
        .unwrap_or_default();
    let returned = query.state.as_deref().unwrap_or_default();
    if !validate_state_token(returned, expected) {
        warn!("Google sign-in rejected: state mismatch");
        return Ok(sign_in_failed(&state, "OAuthState"));
    }

    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing authorization code".to_string()))?;

    let profile = provider.exchange_code(code).await?;
    let result = state.auth.sign_in_oauth(profile).await?;
    info!("Google sign-in completed for user {}", result.user.id);

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, state.session_cookie.issue(&result.access_token)),
            (header::SET_COOKIE, state.oauth_state_cookie.clear()),
        ]),
        Redirect::to(DASHBOARD_PATH),
    )
        .into_response())
}
