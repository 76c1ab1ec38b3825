// ============================================================================
// Menu API - Access Gate Middleware
// File: crates/menu-api/src/middleware/gate.rs
// ============================================================================
//! Resolves the subject for every request, applies the zone decision, and
//! hands the result to handlers as a [`RequestContext`] extension.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use menu_core::access::{classify, evaluate, GateDecision, Subject};
use menu_security::session::{read_bearer, read_cookie};
use tracing::debug;

use crate::context::RequestContext;
use crate::state::AppState;

/// Session cookie first, then a bearer token. A cookie that fails to verify
/// does not hide a valid bearer; anything else is anonymous.
pub fn resolve_subject(state: &AppState, headers: &HeaderMap) -> Subject {
    let cookie_token = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| read_cookie(value, state.session_cookie.name()));
    let bearer_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(read_bearer);

    for token in cookie_token.into_iter().chain(bearer_token) {
        match state.auth.authenticate(token) {
            Ok(user_id) => return Subject::Authenticated(user_id),
            Err(e) => debug!("Session token rejected: {}", e),
        }
    }

    Subject::Anonymous
}

pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let subject = resolve_subject(&state, request.headers());
    let zone = classify(request.uri().path());

    match evaluate(zone, &subject) {
        GateDecision::Redirect(to) => {
            debug!("Gate redirect {} -> {} ({:?})", request.uri().path(), to, zone);
            Redirect::to(to).into_response()
        }
        GateDecision::Allow => {
            request.extensions_mut().insert(RequestContext::new(subject));
            next.run(request).await
        }
    }
}
