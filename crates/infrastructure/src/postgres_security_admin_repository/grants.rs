use super::*;

impl PostgresSecurityAdminRepository {
    /// Locks the role row for the rest of the transaction so concurrent grant
    /// changes on the same role apply one after another.
    async fn lock_role(
        transaction: &mut Transaction<'_, Postgres>,
        role_name: &RoleName,
    ) -> AppResult<uuid::Uuid> {
        sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT id
            FROM roles
            WHERE name = $1
            FOR UPDATE
            "#,
        )
        .bind(role_name.as_str())
        .fetch_optional(&mut **transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to lock role '{role_name}': {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))
    }

    pub(super) async fn grant_permission_impl(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        let mut transaction = self.begin().await?;
        let role_id = Self::lock_role(&mut transaction, role_name).await?;

        let permission_id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT id
            FROM permissions
            WHERE name = $1
            "#,
        )
        .bind(permission.as_str())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve permission: {error}")))?
        .ok_or_else(|| {
            AppError::NotFound(format!("permission '{permission}' is not in the catalog"))
        })?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT (role_id, permission_id) DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to grant permission: {error}")))?
        .rows_affected();

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(inserted > 0)
    }

    pub(super) async fn revoke_permission_impl(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        let mut transaction = self.begin().await?;
        let role_id = Self::lock_role(&mut transaction, role_name).await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM role_permissions
            USING permissions
            WHERE role_permissions.permission_id = permissions.id
                AND role_permissions.role_id = $1
                AND permissions.name = $2
            "#,
        )
        .bind(role_id)
        .bind(permission.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to revoke permission: {error}")))?
        .rows_affected();

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(removed > 0)
    }
}
