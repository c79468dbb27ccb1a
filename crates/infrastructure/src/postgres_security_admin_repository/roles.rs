use crate::postgres_rows::{is_foreign_key_violation, is_unique_violation};

use super::*;

impl PostgresSecurityAdminRepository {
    pub(super) async fn load_roles(
        &self,
        role_name: Option<&RoleName>,
    ) -> AppResult<Vec<RoleDefinition>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.name AS role_name,
                roles.display_name AS role_display_name,
                roles.description AS role_description,
                roles.is_active AS role_is_active,
                roles.is_super_admin AS role_is_super_admin,
                (
                    SELECT COUNT(*)
                    FROM users
                    WHERE users.role_id = roles.id
                ) AS user_count,
                permissions.name AS permission
            FROM roles
            LEFT JOIN role_permissions
                ON role_permissions.role_id = roles.id
            LEFT JOIN permissions
                ON permissions.id = role_permissions.permission_id
            WHERE ($1::TEXT IS NULL OR roles.name = $1)
            ORDER BY roles.name, permissions.name
            "#,
        )
        .bind(role_name.map(RoleName::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        aggregate_roles(rows)
    }

    pub(super) async fn create_role_impl(
        &self,
        input: CreateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let mut transaction = self.begin().await?;

        let role_id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO roles (name, display_name, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.display_name.trim())
        .bind(input.description.as_deref())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Conflict(format!("role '{}' already exists", input.name));
            }
            AppError::Internal(format!("failed to create role '{}': {error}", input.name))
        })?;

        for permission in &input.permissions {
            let inserted = sqlx::query(
                r#"
                INSERT INTO role_permissions (role_id, permission_id)
                SELECT $1, permissions.id
                FROM permissions
                WHERE permissions.name = $2
                ON CONFLICT (role_id, permission_id) DO NOTHING
                "#,
            )
            .bind(role_id)
            .bind(permission.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist role grants: {error}"))
            })?
            .rows_affected();

            if inserted == 0 {
                return Err(AppError::Validation(format!(
                    "permission '{permission}' is not in the catalog"
                )));
            }
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        self.find_role(&input.name).await?.ok_or_else(|| {
            AppError::Internal(format!("created role '{}' could not be reloaded", input.name))
        })
    }

    pub(super) async fn update_role_impl(
        &self,
        role_name: &RoleName,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let updated = sqlx::query(
            r#"
            UPDATE roles
            SET display_name = $2, description = $3, is_active = $4, updated_at = now()
            WHERE name = $1
            "#,
        )
        .bind(role_name.as_str())
        .bind(input.display_name.trim())
        .bind(input.description.as_deref())
        .bind(input.is_active)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update role '{role_name}': {error}"))
        })?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "role '{role_name}' was not found"
            )));
        }

        self.find_role(role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))
    }

    pub(super) async fn delete_role_impl(&self, role_name: &RoleName) -> AppResult<()> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM roles
            WHERE name = $1
            "#,
        )
        .bind(role_name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                return AppError::Conflict(format!(
                    "role '{role_name}' is still assigned to users"
                ));
            }
            AppError::Internal(format!("failed to delete role '{role_name}': {error}"))
        })?
        .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "role '{role_name}' was not found"
            )));
        }

        Ok(())
    }
}
