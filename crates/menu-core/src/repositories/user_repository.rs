//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{LinkedAccount, MemberUser};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MemberUser>, DomainError>;
    /// Case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<MemberUser>, DomainError>;
    async fn create(&self, user: &MemberUser) -> Result<MemberUser, DomainError>;
    async fn update(&self, user: &MemberUser) -> Result<MemberUser, DomainError>;
    /// Idempotent per `(user_id, provider)`.
    async fn link_account(&self, account: &LinkedAccount) -> Result<(), DomainError>;
}
