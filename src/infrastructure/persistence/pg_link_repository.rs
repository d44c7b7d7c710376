//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::StoreError;
use crate::domain::repositories::LinkRepository;

/// Name of the unique index on `md5(original_url)`.
const ORIGINAL_URL_CONSTRAINT: &str = "urls_original_url_key";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: String,
    original_url: String,
    short_url: String,
    created_at: DateTime<Utc>,
    clicks: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.original_url, r.short_url, r.created_at, r.clicks)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Statements are parameterised; the uniqueness rules come from the schema in
/// `migrations/`, so concurrent inserts are arbitrated by the database.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO urls (id, original_url, short_url, created_at, clicks)
            VALUES ($1, $2, $1, $3, 0)
            RETURNING id, original_url, short_url, created_at, clicks
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.original)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_short(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_url, created_at, clicks
            FROM urls
            WHERE short_url = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn find_by_original(&self, original: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_url, created_at, clicks
            FROM urls
            WHERE md5(original_url) = md5($1) AND original_url = $1
            "#,
        )
        .bind(original)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE short_url = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// Translates a SQLx error into the store taxonomy.
///
/// Unique violations are split by constraint name: the original-URL index maps
/// to [`StoreError::DuplicateOriginal`], any other key to [`StoreError::DuplicateCode`].
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                return if db_err.constraint() == Some(ORIGINAL_URL_CONSTRAINT) {
                    StoreError::DuplicateOriginal
                } else {
                    StoreError::DuplicateCode
                };
            }
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return StoreError::ConstraintViolation(db_err.message().to_string());
            }
            _ => {}
        }
    }

    StoreError::Unavailable(e.to_string())
}
