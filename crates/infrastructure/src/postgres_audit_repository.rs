//! Append side of the security audit trail.
//!
//! Every role, grant and account mutation lands in `audit_log_entries`. Rows
//! are never updated or deleted by the application.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use stockroom_application::{AuditEvent, AuditRepository};
use stockroom_core::{AppError, AppResult};

/// PostgreSQL writer for security audit events.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let action = event.action.as_str();
        let entry_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO audit_log_entries (subject, action, resource_type, resource_id, detail)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&event.subject)
        .bind(action)
        .bind(&event.resource_type)
        .bind(&event.resource_id)
        .bind(event.detail.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to record '{action}' on {} '{}': {error}",
                event.resource_type, event.resource_id
            ))
        })?;

        debug!(%entry_id, action, subject = %event.subject, "recorded security audit entry");
        Ok(())
    }
}
