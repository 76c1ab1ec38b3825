// ============================================================================
// Menu Core - Member User Entity
// File: crates/menu-core/src/domain/member_user.rs
// Description: Menu owner account and linked sign-in providers
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sign-in provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Credentials,
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Credentials => "credentials",
            AuthProvider::Google => "google",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "credentials" => Some(AuthProvider::Credentials),
            "google" => Some(AuthProvider::Google),
            _ => None,
        }
    }

    pub fn account_type(&self) -> &'static str {
        match self {
            AuthProvider::Credentials => "credentials",
            AuthProvider::Google => "oauth",
        }
    }
}

/// Member user entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberUser {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Argon2 (or legacy bcrypt) hash; `None` for accounts created through OAuth.
    pub password: Option<String>,

    pub image: Option<String>,
    pub email_verified: bool,

    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl MemberUser {
    pub fn new(
        name: String,
        email: String,
        password: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password,
            image: None,
            email_verified: false,
            created_at: Utc::now(),
            modified_at: None,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}

/// A sign-in method attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub user_id: Uuid,
    pub provider: AuthProvider,
    pub provider_account_id: String,
}

impl LinkedAccount {
    pub fn new(user_id: Uuid, provider: AuthProvider, provider_account_id: &str) -> Self {
        Self {
            user_id,
            provider,
            provider_account_id: provider_account_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_member_user_normalizes_email() {
        let user = MemberUser::new(
            " Layla ".to_string(),
            "Layla@Cafe.Test ".to_string(),
            Some("hash".to_string()),
        )
        .unwrap();

        assert_eq!(user.name, "Layla");
        assert_eq!(user.email, "layla@cafe.test");
        assert!(user.has_password());
        assert!(!user.email_verified);
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let user = MemberUser::new("Layla".to_string(), "not-an-email".to_string(), None);
        assert!(user.is_err());
    }

    #[test]
    fn test_provider_account_type() {
        assert_eq!(AuthProvider::Google.account_type(), "oauth");
        assert_eq!(AuthProvider::from_str("credentials"), Some(AuthProvider::Credentials));
    }
}
