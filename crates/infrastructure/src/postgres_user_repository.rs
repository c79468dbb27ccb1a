//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use stockroom_application::{NewUserRecord, UserAccount, UserRepository};
use stockroom_core::{AppError, AppResult};
use stockroom_domain::{EmailAddress, RoleName, User, UserId};

use crate::postgres_rows::UserRow;

mod account;
mod lookup;


/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserAccountRow {
    #[sqlx(flatten)]
    user: UserRow,
    role_name: String,
}

impl UserAccountRow {
    fn into_account(self) -> AppResult<UserAccount> {
        let role_name = RoleName::new(self.role_name.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "invalid stored role name '{}': {error}",
                self.role_name
            ))
        })?;

        Ok(UserAccount {
            user: self.user.into_user()?,
            role_name,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.find_by_id_impl(user_id).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserAccount>> {
        self.list_users_impl().await
    }

    async fn count_users(&self) -> AppResult<u64> {
        self.count_users_impl().await
    }

    async fn create_user(&self, record: NewUserRecord) -> AppResult<UserAccount> {
        self.create_user_impl(record).await
    }

    async fn assign_role(&self, user_id: UserId, role_name: &RoleName) -> AppResult<UserAccount> {
        self.assign_role_impl(user_id, role_name).await
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserAccount> {
        self.set_active_impl(user_id, is_active).await
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        self.update_password_impl(user_id, password_hash).await
    }
}
