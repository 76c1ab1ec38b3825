//! Request-scoped context carrying the resolved subject.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use menu_core::access::Subject;
use uuid::Uuid;

use crate::error::ApiError;

/// Inserted by the access gate; handlers take it as an extractor instead of
/// reading session state themselves.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub subject: Subject,
}

impl RequestContext {
    pub fn new(subject: Subject) -> Self {
        Self { subject }
    }

    pub fn anonymous() -> Self {
        Self::new(Subject::Anonymous)
    }

    /// The signed-in user, or a redirect to sign-in.
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        self.subject.user_id().ok_or(ApiError::SignInRequired)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(RequestContext::anonymous))
    }
}
