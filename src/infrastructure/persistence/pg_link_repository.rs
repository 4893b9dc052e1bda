//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

const LINK_COLUMNS: &str =
    "id, original_url, code, owner_id, click_count, created_at, updated_at, deleted_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Active-code uniqueness is enforced by the `links_active_code_key` partial
/// index; a violation on insert surfaces as [`AppError::CodeCollision`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    code: String,
    owner_id: Option<i64>,
    click_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            original_url: r.original_url,
            code: r.code,
            owner_id: r.owner_id,
            click_count: r.click_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: r.deleted_at,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (original_url, code, owner_id)
            VALUES ($1, $2, $3)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.original_url)
        .bind(&new_link.code)
        .bind(new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                tracing::debug!(code = %new_link.code, "Active code already taken at insert");
                AppError::CodeCollision
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE code = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_active_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_active_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE owner_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn save(&self, link: Link) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET original_url = $2,
                deleted_at = $3,
                updated_at = NOW()
            WHERE id = $1
              AND owner_id IS NOT DISTINCT FROM $4
              AND deleted_at IS NULL
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(link.id)
        .bind(&link.original_url)
        .bind(link.deleted_at)
        .bind(link.owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or_else(|| {
            tracing::debug!(link_id = link.id, "Link deleted or reassigned before save");
            AppError::LinkNotFound
        })
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE code = $1 AND deleted_at IS NULL
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE deleted_at IS NULL")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
