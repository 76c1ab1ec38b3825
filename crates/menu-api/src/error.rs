// ============================================================================
// Menu API - Error Mapping
// File: crates/menu-api/src/error.rs
// ============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use menu_core::access::denied_redirect;
use menu_core::{DomainError, FieldErrors};
use menu_shared::constants::SIGN_IN_PATH;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Sends the caller to the sign-in page.
    #[error("Sign-in required")]
    SignInRequired,

    /// Sends the caller home without saying why.
    #[error("Access denied")]
    AccessDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ValidationError(fields) => ApiError::Validation(fields),
            DomainError::DraftNotFound(id) => ApiError::NotFound(format!("Menu {} not found", id)),
            DomainError::AccessDenied => ApiError::AccessDenied,
            DomainError::PersistenceError(msg) => ApiError::Persistence(msg),
            DomainError::UploadError(msg) => ApiError::Upload(msg),
            DomainError::MissingFields => ApiError::BadRequest("Missing fields".to_string()),
            DomainError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            DomainError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            DomainError::EmailAlreadyExists(_) => {
                ApiError::Conflict("Email already in use".to_string())
            }
            DomainError::CurrentPasswordRequired | DomainError::IncorrectCurrentPassword => {
                ApiError::BadRequest(e.to_string())
            }
            DomainError::IdentityProviderError(msg) => ApiError::IdentityProvider(msg),
            DomainError::PasswordHashError(msg)
            | DomainError::TokenGenerationError(msg)
            | DomainError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::SignInRequired => return Redirect::to(SIGN_IN_PATH).into_response(),
            ApiError::AccessDenied => {
                warn!("Access denied, redirecting home");
                return Redirect::to(denied_redirect()).into_response();
            }
            ApiError::Validation(fields) => {
                warn!("Validation failed: {}", fields);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    "Please correct the highlighted fields".to_string(),
                    Some(fields),
                )
            }
            ApiError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None)
            }
            ApiError::Unauthorized(msg) => {
                warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None)
            }
            ApiError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None)
            }
            ApiError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg, None)
            }
            ApiError::Persistence(msg) => {
                error!("Persistence error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PERSISTENCE_ERROR",
                    "Could not save your changes, please try again".to_string(),
                    None,
                )
            }
            ApiError::Upload(msg) => {
                error!("Upload error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "UPLOAD_ERROR",
                    "Could not upload the file, please try again".to_string(),
                    None,
                )
            }
            ApiError::IdentityProvider(msg) => {
                error!("Identity provider error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "IDENTITY_PROVIDER_ERROR",
                    "Sign-in provider is unavailable".to_string(),
                    None,
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Something went wrong".to_string(),
                    None,
                )
            }
        };

        (status, Json(ApiResponse::error_with_fields(code, &message, fields))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_access_denied_redirects_home() {
        let response = ApiError::from(DomainError::AccessDenied).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (DomainError::field("name", "Menu name is required"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::PersistenceError("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::UploadError("down".into()), StatusCode::BAD_GATEWAY),
            (DomainError::MissingFields, StatusCode::BAD_REQUEST),
            (DomainError::EmailAlreadyExists("a@b.test".into()), StatusCode::CONFLICT),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::IncorrectCurrentPassword, StatusCode::BAD_REQUEST),
        ];
        for (domain, expected) in cases {
            assert_eq!(ApiError::from(domain).into_response().status(), expected);
        }
    }
}
