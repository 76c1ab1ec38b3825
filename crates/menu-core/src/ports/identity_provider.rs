//! Identity provider trait (port)

use async_trait::async_trait;

use crate::domain::AuthProvider;
use crate::error::DomainError;

/// Profile handed back by an OAuth provider after a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    pub provider: AuthProvider,
    /// Provider-side account id (`sub`).
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider(&self) -> AuthProvider;
    /// Consent page URL carrying `state`.
    fn authorization_url(&self, state: &str) -> String;
    async fn exchange_code(&self, code: &str) -> Result<OAuthProfile, DomainError>;
}
