// ============================================================================
// Menu Infrastructure - PostgreSQL Draft Repository
// File: crates/menu-infrastructure/src/database/postgres/draft_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use menu_core::domain::{Brand, Category, MenuDraft, Visibility};
use menu_core::error::DomainError;
use menu_core::repositories::DraftRepository;

pub struct PgDraftRepository {
    pool: PgPool,
}

impl PgDraftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuDraftRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub accent_color: String,
    pub categories: Json<Vec<Category>>,
    pub visibility: String,
    pub published_artifact_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuDraftRow> for MenuDraft {
    fn from(row: MenuDraftRow) -> Self {
        MenuDraft {
            id: row.id,
            owner_id: row.owner_id,
            brand: Brand {
                logo_url: row.logo_url,
                primary_color: row.primary_color,
                accent_color: row.accent_color,
            },
            name: row.name,
            categories: row.categories.0,
            visibility: Visibility::from_str(&row.visibility).unwrap_or_default(),
            published_artifact_url: row.published_artifact_url,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

fn persistence_error(action: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", action, e);
    DomainError::PersistenceError(e.to_string())
}

#[async_trait]
impl DraftRepository for PgDraftRepository {
    async fn upsert(&self, draft: &MenuDraft) -> Result<MenuDraft, DomainError> {
        // owner_id and created_at are only written by the INSERT branch; the
        // WHERE guard turns a foreign id into zero returned rows.
        let row: Option<MenuDraftRow> = sqlx::query_as(
            r#"
            INSERT INTO menu_drafts (
                id, owner_id, name, logo_url, primary_color, accent_color,
                categories, visibility, published_artifact_url,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                logo_url = EXCLUDED.logo_url,
                primary_color = EXCLUDED.primary_color,
                accent_color = EXCLUDED.accent_color,
                categories = EXCLUDED.categories,
                visibility = EXCLUDED.visibility,
                published_artifact_url = EXCLUDED.published_artifact_url,
                updated_at = NOW()
            WHERE menu_drafts.owner_id = EXCLUDED.owner_id
            RETURNING
                id, owner_id, name, logo_url, primary_color, accent_color,
                categories, visibility, published_artifact_url,
                created_at, updated_at
            "#,
        )
        .bind(draft.id)
        .bind(draft.owner_id)
        .bind(&draft.name)
        .bind(&draft.brand.logo_url)
        .bind(&draft.brand.primary_color)
        .bind(&draft.brand.accent_color)
        .bind(Json(&draft.categories))
        .bind(draft.visibility.as_str())
        .bind(&draft.published_artifact_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("upserting menu draft", e))?;

        match row {
            Some(row) => {
                info!("Menu draft {} saved", row.id);
                Ok(row.into())
            }
            None => {
                warn!("Upsert of menu {} refused: owner mismatch", draft.id);
                Err(DomainError::AccessDenied)
            }
        }
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuDraft>, DomainError> {
        let row: Option<MenuDraftRow> = sqlx::query_as(
            r#"
            SELECT
                id, owner_id, name, logo_url, primary_color, accent_color,
                categories, visibility, published_artifact_url,
                created_at, updated_at
            FROM menu_drafts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("finding menu draft by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_owner(&self, owner_id: &Uuid) -> Result<Vec<MenuDraft>, DomainError> {
        let rows: Vec<MenuDraftRow> = sqlx::query_as(
            r#"
            SELECT
                id, owner_id, name, logo_url, primary_color, accent_color,
                categories, visibility, published_artifact_url,
                created_at, updated_at
            FROM menu_drafts
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("listing menu drafts", e))?;

        Ok(rows.into_iter().map(MenuDraft::from).collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM menu_drafts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("deleting menu draft", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DraftNotFound(*id));
        }
        Ok(())
    }

    async fn update_visibility(
        &self,
        id: &Uuid,
        visibility: Visibility,
        artifact_url: Option<String>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE menu_drafts
            SET
                visibility = $2,
                published_artifact_url = COALESCE($3, published_artifact_url),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(visibility.as_str())
        .bind(artifact_url)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("updating menu visibility", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DraftNotFound(*id));
        }
        Ok(())
    }
}
