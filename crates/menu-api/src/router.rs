// ============================================================================
// Menu API - Router
// File: crates/menu-api/src/router.rs
// ============================================================================

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use menu_shared::constants::MAX_UPLOAD_BYTES;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{account, auth, health, menus, pages, wizard};
use crate::middleware::access_gate;
use crate::state::AppState;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(pages::landing))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/google", get(auth::google_start))
        .route("/api/auth/google/callback", get(auth::google_callback))
        .route("/login", get(pages::sign_in))
        .route("/register", get(pages::sign_in))
        .route("/menu/{id}", get(menus::view_menu));

    let protected_routes = Router::new()
        .route("/designs", get(menus::dashboard))
        .route("/api/menus", post(menus::create_draft))
        .route("/api/menus/{id}", delete(menus::delete_menu))
        .route("/api/menus/{id}/visibility", patch(menus::set_visibility))
        .route("/menus/create", get(wizard::step_view))
        .route("/menus/create/branding", post(wizard::submit_branding))
        .route("/menus/create/content", post(wizard::submit_content))
        .route("/menus/create/publish", post(wizard::publish))
        .route(
            "/account",
            get(account::get_account).put(account::update_account),
        )
        .route(
            "/api/account",
            get(account::get_account).put(account::update_account),
        );

    let cors = cors_layer(&state.config.cors.allowed_origins);

    // Zones are decided by path, so one gate covers both groups.
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
