use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use stockroom_application::{
    CreateRoleInput, RoleDefinition, SecurityAdminRepository, UpdateRoleInput,
};
use stockroom_core::{AppError, AppResult};
use stockroom_domain::{PermissionDefinition, PermissionId, PermissionName, RoleName};

use crate::postgres_rows::{RoleColumns, decode_permission};

mod grants;
mod roles;


/// PostgreSQL-backed repository for role administration.
#[derive(Clone)]
pub struct PostgresSecurityAdminRepository {
    pool: PgPool,
}

impl PostgresSecurityAdminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|error| AppError::Internal(format!("failed to begin transaction: {error}")))
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: uuid::Uuid,
    name: String,
    display_name: String,
    category: String,
}

#[derive(Debug, FromRow)]
struct RoleRow {
    #[sqlx(flatten)]
    role: RoleColumns,
    user_count: i64,
    permission: Option<String>,
}

#[async_trait]
impl SecurityAdminRepository for PostgresSecurityAdminRepository {
    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, display_name, category
            FROM permissions
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        rows.into_iter()
            .map(|row| {
                PermissionDefinition::new(
                    PermissionId::from_uuid(row.id),
                    decode_permission(row.name.as_str())?,
                    row.display_name,
                    row.category,
                )
            })
            .collect()
    }

    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.load_roles(None).await
    }

    async fn find_role(&self, role_name: &RoleName) -> AppResult<Option<RoleDefinition>> {
        Ok(self.load_roles(Some(role_name)).await?.into_iter().next())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        self.create_role_impl(input).await
    }

    async fn update_role(
        &self,
        role_name: &RoleName,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        self.update_role_impl(role_name, input).await
    }

    async fn delete_role(&self, role_name: &RoleName) -> AppResult<()> {
        self.delete_role_impl(role_name).await
    }

    async fn grant_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        self.grant_permission_impl(role_name, permission).await
    }

    async fn revoke_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        self.revoke_permission_impl(role_name, permission).await
    }
}

/// Folds one row per (role, grant) into role definitions, keeping row order.
fn aggregate_roles(rows: Vec<RoleRow>) -> AppResult<Vec<RoleDefinition>> {
    let mut roles: Vec<RoleDefinition> = Vec::new();

    for row in rows {
        let is_same_role = roles
            .last()
            .is_some_and(|current| current.role.id().as_uuid() == row.role.role_id);

        if !is_same_role {
            roles.push(RoleDefinition {
                role: row.role.into_role()?,
                permissions: Vec::new(),
                user_count: u64::try_from(row.user_count).unwrap_or_default(),
            });
        }

        if let (Some(permission), Some(current)) = (row.permission, roles.last_mut()) {
            current.permissions.push(decode_permission(permission.as_str())?);
        }
    }

    Ok(roles)
}
