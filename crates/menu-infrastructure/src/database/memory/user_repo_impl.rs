// ============================================================================
// Menu Infrastructure - In-Memory User Repository
// File: crates/menu-infrastructure/src/database/memory/user_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::{AuthProvider, LinkedAccount, MemberUser};
use menu_core::error::DomainError;
use menu_core::repositories::UserRepository;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, MemberUser>>,
    accounts: RwLock<HashMap<(Uuid, AuthProvider), LinkedAccount>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn accounts_for(&self, user_id: &Uuid) -> Vec<LinkedAccount> {
        self.accounts
            .read()
            .await
            .values()
            .filter(|a| a.user_id == *user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MemberUser>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberUser>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn create(&self, user: &MemberUser) -> Result<MemberUser, DomainError> {
        let mut users = self.users.write().await;
        let email = user.email.to_lowercase();
        if users.values().any(|u| u.email.to_lowercase() == email) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &MemberUser) -> Result<MemberUser, DomainError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(DomainError::UserNotFound)?;
        *stored = user.clone();
        Ok(user.clone())
    }

    async fn link_account(&self, account: &LinkedAccount) -> Result<(), DomainError> {
        self.accounts
            .write()
            .await
            .insert((account.user_id, account.provider), account.clone());
        Ok(())
    }
}
