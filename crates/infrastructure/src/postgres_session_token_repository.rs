use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use stockroom_application::{SessionTokenRecord, SessionTokenRepository};
use stockroom_core::{AppError, AppResult};
use stockroom_domain::UserId;

/// PostgreSQL-backed session token store. Rows hold token hashes only.
#[derive(Clone)]
pub struct PostgresSessionTokenRepository {
    pool: PgPool,
}

impl PostgresSessionTokenRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deletes expired tokens and returns how many were removed.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let purged = sqlx::query("DELETE FROM session_tokens WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to purge expired session tokens: {error}"))
            })?
            .rows_affected();

        debug!(purged, "purged expired session tokens");
        Ok(purged)
    }
}

#[derive(Debug, FromRow)]
struct SessionTokenRow {
    user_id: uuid::Uuid,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl SessionTokenRepository for PostgresSessionTokenRepository {
    async fn insert_token(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO session_tokens (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token_hash)
        .bind(user_id.as_uuid())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to store session token: {error}")))?;

        Ok(())
    }

    async fn find_token(&self, token_hash: &str) -> AppResult<Option<SessionTokenRecord>> {
        let row = sqlx::query_as::<_, SessionTokenRow>(
            r#"
            SELECT user_id, expires_at
            FROM session_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find session token: {error}")))?;

        Ok(row.map(|row| SessionTokenRecord {
            user_id: UserId::from_uuid(row.user_id),
            expires_at: row.expires_at,
        }))
    }

    async fn delete_token(&self, token_hash: &str) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM session_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete session token: {error}"))
            })?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_tokens_for_user(&self, user_id: UserId) -> AppResult<u64> {
        let deleted = sqlx::query("DELETE FROM session_tokens WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete session tokens: {error}"))
            })?
            .rows_affected();

        Ok(deleted)
    }
}
