//! Entry documents for the landing and sign-in pages. Rendering is left to
//! the client; these describe what each page offers.

use axum::{extract::State, Json};
use menu_shared::constants::{DASHBOARD_PATH, SIGN_IN_PATH};
use serde::Serialize;

use crate::context::RequestContext;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LandingPage {
    pub name: String,
    pub signed_in: bool,
    pub dashboard_url: &'static str,
    pub sign_in_url: &'static str,
}

#[derive(Serialize)]
pub struct SignInPage {
    pub credentials_url: &'static str,
    pub register_url: &'static str,
    /// Present when Google sign-in is configured.
    pub google_url: Option<&'static str>,
}

pub async fn landing(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Json<ApiResponse<LandingPage>> {
    Json(ApiResponse::success(LandingPage {
        name: state.config.app.name.clone(),
        signed_in: ctx.subject.is_authenticated(),
        dashboard_url: DASHBOARD_PATH,
        sign_in_url: SIGN_IN_PATH,
    }))
}

pub async fn sign_in(State(state): State<AppState>) -> Json<ApiResponse<SignInPage>> {
    Json(ApiResponse::success(SignInPage {
        credentials_url: "/api/auth/login",
        register_url: "/api/auth/register",
        google_url: state.identity.as_ref().map(|_| "/api/auth/google"),
    }))
}
