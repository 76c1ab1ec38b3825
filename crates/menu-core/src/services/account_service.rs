// ============================================================================
// Menu Core - Account Service
// File: crates/menu-core/src/services/account_service.rs
// ============================================================================

use std::sync::Arc;

use menu_security::PasswordService;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::auth_service::{check_password_length, UserInfo};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Partial account update. Absent fields stay as stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get(&self, user_id: &Uuid) -> Result<UserInfo, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        Ok(UserInfo::from(&user))
    }

    /// A new password needs the current one whenever a password is already set.
    pub async fn update(&self, user_id: &Uuid, update: AccountUpdate) -> Result<UserInfo, DomainError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(image) = update.image {
            user.image = Some(image.trim().to_string()).filter(|i| !i.is_empty());
        }

        if let Some(new_password) = update.password.filter(|p| !p.is_empty()) {
            if let Some(stored_hash) = user.password.as_deref() {
                let current = update
                    .current_password
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .ok_or(DomainError::CurrentPasswordRequired)?;

                let valid = PasswordService::verify(current, stored_hash)
                    .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
                if !valid {
                    warn!("Account update rejected: incorrect current password for {}", user_id);
                    return Err(DomainError::IncorrectCurrentPassword);
                }
            }

            check_password_length(&new_password, "password")?;
            let hash = PasswordService::hash(&new_password)
                .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
            user.password = Some(hash);
        }

        user.validate()?;
        user.touch();

        let saved = self.users.update(&user).await?;
        info!("Account {} updated", user_id);
        Ok(UserInfo::from(&saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberUser;
    use crate::repositories::MockUserRepository;

    fn user_with(password: Option<&str>) -> MemberUser {
        let hash = password.map(|p| PasswordService::hash(p).unwrap());
        MemberUser::new("Layla".to_string(), "layla@cafe.test".to_string(), hash).unwrap()
    }

    fn repo_with(user: MemberUser) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users
    }

    #[tokio::test]
    async fn test_update_name_and_image() {
        let user = user_with(Some("correct horse"));
        let id = user.id;
        let mut users = repo_with(user);
        users
            .expect_update()
            .withf(|u| u.name == "Layla K" && u.modified_at.is_some())
            .times(1)
            .returning(|u| Ok(u.clone()));

        let info = AccountService::new(Arc::new(users))
            .update(
                &id,
                AccountUpdate {
                    name: Some(" Layla K ".to_string()),
                    image: Some("https://img.test/l.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(info.image.as_deref(), Some("https://img.test/l.png"));
    }

    #[tokio::test]
    async fn test_password_change_requires_current_password() {
        let user = user_with(Some("correct horse"));
        let id = user.id;
        let mut users = repo_with(user);
        users.expect_update().never();
        let service = AccountService::new(Arc::new(users));

        let missing = service
            .update(
                &id,
                AccountUpdate {
                    password: Some("battery staple".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(missing, Err(DomainError::CurrentPasswordRequired)));

        let wrong = service
            .update(
                &id,
                AccountUpdate {
                    password: Some("battery staple".to_string()),
                    current_password: Some("wrong horse".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(wrong, Err(DomainError::IncorrectCurrentPassword)));
    }

    #[tokio::test]
    async fn test_password_change_rehashes() {
        let user = user_with(Some("correct horse"));
        let id = user.id;
        let mut users = repo_with(user);
        users
            .expect_update()
            .withf(|u| {
                u.password
                    .as_deref()
                    .is_some_and(|h| PasswordService::verify("battery staple", h).unwrap_or(false))
            })
            .times(1)
            .returning(|u| Ok(u.clone()));

        let result = AccountService::new(Arc::new(users))
            .update(
                &id,
                AccountUpdate {
                    password: Some("battery staple".to_string()),
                    current_password: Some("correct horse".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_passwordless_user_can_set_password() {
        let user = user_with(None);
        let id = user.id;
        let mut users = repo_with(user);
        users.expect_update().times(1).returning(|u| Ok(u.clone()));

        let info = AccountService::new(Arc::new(users))
            .update(
                &id,
                AccountUpdate {
                    password: Some("battery staple".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(info.has_password);
    }

    #[tokio::test]
    async fn test_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let result = AccountService::new(Arc::new(users)).get(&Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::UserNotFound)));
    }
}
