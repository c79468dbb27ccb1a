use super::*;

const ACCOUNT_COLUMNS: &str = r#"
    users.id,
    users.email,
    users.display_name,
    users.password_hash,
    users.is_active,
    users.role_id,
    roles.name AS role_name
"#;

impl PostgresUserRepository {
    pub(super) async fn find_by_email_impl(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, display_name, password_hash, is_active, role_id
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?;

        row.map(UserRow::into_user).transpose()
    }

    pub(super) async fn find_by_id_impl(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, display_name, password_hash, is_active, role_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by id: {error}")))?;

        row.map(UserRow::into_user).transpose()
    }

    pub(super) async fn find_account(&self, user_id: UserId) -> AppResult<UserAccount> {
        let row = sqlx::query_as::<_, UserAccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM users
            INNER JOIN roles ON roles.id = users.role_id
            WHERE users.id = $1
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user account: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' was not found")))?;

        row.into_account()
    }

    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<UserAccount>> {
        let rows = sqlx::query_as::<_, UserAccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM users
            INNER JOIN roles ON roles.id = users.role_id
            ORDER BY users.email
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter().map(UserAccountRow::into_account).collect()
    }

    pub(super) async fn count_users_impl(&self) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count users: {error}")))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
