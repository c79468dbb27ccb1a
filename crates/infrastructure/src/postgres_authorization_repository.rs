use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use stockroom_application::{AuthorizationRepository, RoleGrants};
use stockroom_core::{AppError, AppResult};
use stockroom_domain::{Role, RoleId, RoleName};

use crate::postgres_rows::{RoleColumns, decode_permission};

/// PostgreSQL-backed repository for role grant lookups.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleGrantRow {
    #[sqlx(flatten)]
    role: RoleColumns,
    permission: Option<String>,
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn find_role_grants(&self, role_id: RoleId) -> AppResult<Option<RoleGrants>> {
        let rows = sqlx::query_as::<_, RoleGrantRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.name AS role_name,
                roles.display_name AS role_display_name,
                roles.description AS role_description,
                roles.is_active AS role_is_active,
                roles.is_super_admin AS role_is_super_admin,
                permissions.name AS permission
            FROM roles
            LEFT JOIN role_permissions
                ON role_permissions.role_id = roles.id
            LEFT JOIN permissions
                ON permissions.id = role_permissions.permission_id
            WHERE roles.id = $1
            ORDER BY permissions.name
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load grants for role '{role_id}': {error}"))
        })?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };
        let role = first.role.clone().into_role()?;

        let permissions = rows
            .iter()
            .filter_map(|row| row.permission.as_deref())
            .map(decode_permission)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(RoleGrants { role, permissions }))
    }

    async fn find_role_by_name(&self, role_name: &RoleName) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleColumns>(
            r#"
            SELECT
                id AS role_id,
                name AS role_name,
                display_name AS role_display_name,
                description AS role_description,
                is_active AS role_is_active,
                is_super_admin AS role_is_super_admin
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(role_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find role '{role_name}': {error}"))
        })?;

        row.map(RoleColumns::into_role).transpose()
    }
}
