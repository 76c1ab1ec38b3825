// ============================================================================
// Menu Core - Authentication Service
// File: crates/menu-core/src/services/auth_service.rs
// ============================================================================
//! Credentials registration and login, plus OAuth sign-in with account linking

use std::sync::Arc;

use menu_security::{JwtService, PasswordService};
use menu_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use menu_shared::utils::mask_email;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{AuthProvider, LinkedAccount, MemberUser};
use crate::error::DomainError;
use crate::ports::OAuthProfile;
use crate::repositories::UserRepository;

/// Authentication service for credentials and OAuth flows
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    /// Register a new credentials user
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, DomainError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::MissingFields);
        }
        check_password_length(password, "password")?;

        info!("Registration attempt for email: {}", mask_email(email));

        // 1. Check if email already exists
        if self.users.find_by_email(email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(email));
            return Err(DomainError::EmailAlreadyExists(email.trim().to_lowercase()));
        }

        // 2. Hash password
        let password_hash = PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 3. Create user entity
        let user = MemberUser::new(name.to_string(), email.to_string(), Some(password_hash))?;

        // 4. Persist user and its credentials account
        let created = self.users.create(&user).await?;
        self.users
            .link_account(&LinkedAccount::new(created.id, AuthProvider::Credentials, &created.email))
            .await?;

        info!("Registration successful for user {}", created.id);
        Ok(UserInfo::from(&created))
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }

        info!("Login attempt for email: {}", mask_email(email));

        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", mask_email(email));
            DomainError::InvalidCredentials
        })?;

        // OAuth-only accounts have nothing to compare against
        let stored_hash = user.password.as_deref().ok_or(DomainError::InvalidCredentials)?;

        let valid = PasswordService::verify(password, stored_hash).map_err(|e| {
            error!("Stored password hash for {} is unreadable: {}", user.id, e);
            DomainError::InvalidCredentials
        })?;
        if !valid {
            warn!("Login failed: invalid password for user {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        self.issue(user)
    }

    /// Signs in from a provider profile. An existing user with the same email
    /// gets the provider linked; password-less users get their profile fields
    /// refreshed. Otherwise a verified, password-less user is created.
    pub async fn sign_in_oauth(&self, profile: OAuthProfile) -> Result<LoginResult, DomainError> {
        if profile.email.trim().is_empty() {
            return Err(DomainError::IdentityProviderError(
                "provider returned no email".to_string(),
            ));
        }

        info!(
            "OAuth sign-in via {} for {}",
            profile.provider.as_str(),
            mask_email(&profile.email)
        );

        let user = match self.users.find_by_email(&profile.email).await? {
            Some(mut existing) => {
                if !existing.has_password() {
                    if let Some(name) = profile.name.as_deref().filter(|n| !n.trim().is_empty()) {
                        existing.name = name.trim().to_string();
                    }
                    existing.image = profile.image.clone().or(existing.image);
                    existing.email_verified = true;
                    existing.touch();
                    existing = self.users.update(&existing).await?;
                }
                existing
            }
            None => {
                let name = profile
                    .name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| profile.email.clone());
                let mut user = MemberUser::new(name, profile.email.clone(), None)?;
                user.image = profile.image.clone();
                user.email_verified = true;
                let created = self.users.create(&user).await?;
                info!("Created user {} from {} profile", created.id, profile.provider.as_str());
                created
            }
        };

        self.users
            .link_account(&LinkedAccount::new(user.id, profile.provider, &profile.subject))
            .await?;

        self.issue(user)
    }

    /// Resolves a session token to its user id.
    pub fn authenticate(&self, token: &str) -> Result<Uuid, DomainError> {
        self.jwt.subject(token).map_err(|_| DomainError::AccessDenied)
    }

    pub fn session_max_age(&self) -> i64 {
        self.jwt.access_token_expiry()
    }

    fn issue(&self, user: MemberUser) -> Result<LoginResult, DomainError> {
        let access_token = self
            .jwt
            .generate_access_token(&user.id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Login successful for user {}", user.id);

        Ok(LoginResult {
            user: UserInfo::from(&user),
            access_token,
            expires_in: self.jwt.access_token_expiry(),
        })
    }
}

pub(crate) fn check_password_length(password: &str, field: &str) -> Result<(), DomainError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH || length > MAX_PASSWORD_LENGTH {
        return Err(DomainError::field(
            field,
            &format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            ),
        ));
    }
    Ok(())
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub access_token: String,
    pub expires_in: i64,
}

/// User info returned in auth and account responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: bool,
    pub has_password: bool,
}

impl From<&MemberUser> for UserInfo {
    fn from(user: &MemberUser) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            email_verified: user.email_verified,
            has_password: user.has_password(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    const SECRET: &str = "auth-service-test-secret";

    fn service(users: MockUserRepository) -> AuthService {
        AuthService::new(Arc::new(users), JwtService::new(SECRET, 3600))
    }

    fn stored_user(password: Option<&str>) -> MemberUser {
        let hash = password.map(|p| PasswordService::hash(p).unwrap());
        MemberUser::new("Layla".to_string(), "layla@cafe.test".to_string(), hash).unwrap()
    }

    fn google_profile() -> OAuthProfile {
        OAuthProfile {
            provider: AuthProvider::Google,
            subject: "google-sub-1".to_string(),
            email: "layla@cafe.test".to_string(),
            name: Some("Layla K".to_string()),
            image: Some("https://img.test/layla.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_and_credentials_account() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| u.email == "layla@cafe.test" && u.password.as_deref().is_some_and(|h| h.starts_with("$argon2")))
            .times(1)
            .returning(|u| Ok(u.clone()));
        users
            .expect_link_account()
            .withf(|a| a.provider == AuthProvider::Credentials && a.provider_account_id == "layla@cafe.test")
            .times(1)
            .returning(|_| Ok(()));

        let info = service(users)
            .register("Layla", "Layla@Cafe.test", "correct horse")
            .await
            .unwrap();
        assert_eq!(info.email, "layla@cafe.test");
        assert!(info.has_password);
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields_and_duplicates() {
        let users = MockUserRepository::new();
        assert!(matches!(
            service(users).register("", "layla@cafe.test", "correct horse").await,
            Err(DomainError::MissingFields)
        ));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(Some("correct horse")))));
        users.expect_create().never();
        assert!(matches!(
            service(users).register("Layla", "layla@cafe.test", "correct horse").await,
            Err(DomainError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let users = MockUserRepository::new();
        let result = service(users).register("Layla", "layla@cafe.test", "short").await;
        assert!(matches!(result, Err(DomainError::ValidationError(ref e)) if e.contains("password")));
    }

    #[tokio::test]
    async fn test_login_issues_session_token() {
        let user = stored_user(Some("correct horse"));
        let user_id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(users);
        let result = service.login("layla@cafe.test", "correct horse").await.unwrap();
        assert_eq!(result.user.id, user_id);
        assert_eq!(service.authenticate(&result.access_token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let user = stored_user(Some("correct horse"));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |email| Ok((email == "layla@cafe.test").then(|| user.clone())));
        let service = service(users);

        assert!(matches!(
            service.login("layla@cafe.test", "wrong horse").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody@cafe.test", "correct horse").await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_oauth_only_user() {
        let user = stored_user(None);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        assert!(matches!(
            service(users).login("layla@cafe.test", "anything at all").await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_oauth_creates_verified_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| u.email_verified && u.password.is_none() && u.name == "Layla K")
            .times(1)
            .returning(|u| Ok(u.clone()));
        users
            .expect_link_account()
            .withf(|a| a.provider == AuthProvider::Google && a.provider_account_id == "google-sub-1")
            .times(1)
            .returning(|_| Ok(()));

        let result = service(users).sign_in_oauth(google_profile()).await.unwrap();
        assert!(result.user.email_verified);
        assert!(!result.user.has_password);
    }

    #[tokio::test]
    async fn test_oauth_links_existing_password_user_without_touching_profile() {
        let existing = stored_user(Some("correct horse"));
        let existing_id = existing.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        users.expect_update().never();
        users.expect_create().never();
        users
            .expect_link_account()
            .withf(move |a| a.user_id == existing_id)
            .times(1)
            .returning(|_| Ok(()));

        let result = service(users).sign_in_oauth(google_profile()).await.unwrap();
        assert_eq!(result.user.name, "Layla");
        assert!(result.user.has_password);
    }

    #[tokio::test]
    async fn test_oauth_normalizes_passwordless_user() {
        let existing = stored_user(None);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        users
            .expect_update()
            .withf(|u| u.email_verified && u.image.is_some() && u.name == "Layla K")
            .times(1)
            .returning(|u| Ok(u.clone()));
        users.expect_link_account().returning(|_| Ok(()));

        let result = service(users).sign_in_oauth(google_profile()).await.unwrap();
        assert_eq!(result.user.image.as_deref(), Some("https://img.test/layla.png"));
    }

    #[test]
    fn test_authenticate_rejects_garbage() {
        let service = service(MockUserRepository::new());
        assert!(matches!(
            service.authenticate("not-a-token"),
            Err(DomainError::AccessDenied)
        ));
    }
}
