use crate::postgres_rows::is_unique_violation;

use super::*;

impl PostgresUserRepository {
    async fn resolve_role_id(&self, role_name: &RoleName) -> AppResult<uuid::Uuid> {
        sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM roles WHERE name = $1")
            .bind(role_name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to resolve role: {error}")))?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))
    }

    pub(super) async fn create_user_impl(&self, record: NewUserRecord) -> AppResult<UserAccount> {
        let role_id = self.resolve_role_id(&record.role_name).await?;

        let id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO users (email, display_name, password_hash, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(record.email.as_str())
        .bind(record.display_name.as_str())
        .bind(record.password_hash.as_str())
        .bind(role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Conflict(format!(
                    "user '{}' already exists",
                    record.email.as_str()
                ));
            }
            AppError::Internal(format!("failed to create user: {error}"))
        })?;

        self.find_account(UserId::from_uuid(id)).await
    }

    pub(super) async fn assign_role_impl(
        &self,
        user_id: UserId,
        role_name: &RoleName,
    ) -> AppResult<UserAccount> {
        let role_id = self.resolve_role_id(role_name).await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET role_id = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to assign role: {error}")))?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' was not found")));
        }

        self.find_account(user_id).await
    }

    pub(super) async fn set_active_impl(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserAccount> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user status: {error}")))?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' was not found")));
        }

        self.find_account(user_id).await
    }

    pub(super) async fn update_password_impl(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, password_changed_at = now(), updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update password: {error}")))?;

        Ok(())
    }
}
