// ============================================================================
// Menu Infrastructure - PostgreSQL User Repository
// File: crates/menu-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use menu_core::domain::{LinkedAccount, MemberUser};
use menu_core::error::DomainError;
use menu_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MemberUserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub image: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<MemberUserRow> for MemberUser {
    fn from(row: MemberUserRow) -> Self {
        MemberUser {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            image: row.image,
            email_verified: row.email_verified,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MemberUser>, DomainError> {
        let row: Option<MemberUserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password, image, email_verified, created_at, modified_at
            FROM member_users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by id: {}", e);
            DomainError::PersistenceError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberUser>, DomainError> {
        let row: Option<MemberUserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password, image, email_verified, created_at, modified_at
            FROM member_users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by email: {}", e);
            DomainError::PersistenceError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &MemberUser) -> Result<MemberUser, DomainError> {
        let row: MemberUserRow = sqlx::query_as(
            r#"
            INSERT INTO member_users (
                id, name, email, password, image, email_verified, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, password, image, email_verified, created_at, modified_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.image)
        .bind(user.email_verified)
        .bind(user.created_at)
        .bind(user.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                error!("Database error creating user: {}", e);
                DomainError::PersistenceError(e.to_string())
            }
        })?;

        info!("User created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, user: &MemberUser) -> Result<MemberUser, DomainError> {
        let row: Option<MemberUserRow> = sqlx::query_as(
            r#"
            UPDATE member_users
            SET
                name = $2,
                email = $3,
                password = $4,
                image = $5,
                email_verified = $6,
                modified_at = $7
            WHERE id = $1
            RETURNING id, name, email, password, image, email_verified, created_at, modified_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.image)
        .bind(user.email_verified)
        .bind(user.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating user: {}", e);
            DomainError::PersistenceError(e.to_string())
        })?;

        row.map(MemberUser::from).ok_or(DomainError::UserNotFound)
    }

    async fn link_account(&self, account: &LinkedAccount) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO linked_accounts (user_id, provider, account_type, provider_account_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, provider)
            DO UPDATE SET provider_account_id = EXCLUDED.provider_account_id
            "#,
        )
        .bind(account.user_id)
        .bind(account.provider.as_str())
        .bind(account.provider.account_type())
        .bind(&account.provider_account_id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error linking {} account: {}", account.provider.as_str(), e);
            DomainError::PersistenceError(e.to_string())
        })?;

        Ok(())
    }
}
