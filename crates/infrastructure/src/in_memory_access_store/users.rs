use async_trait::async_trait;
use stockroom_application::{NewUserRecord, UserAccount, UserRepository};
use stockroom_domain::EmailAddress;

use super::*;

impl InMemoryAccessStore {
    fn account(roles: &HashMap<RoleId, StoredRole>, user: &User) -> AppResult<UserAccount> {
        let role_name = roles
            .get(&user.role_id())
            .map(|stored| stored.role.name().clone())
            .ok_or_else(|| {
                AppError::DataIntegrity(format!(
                    "user '{}' references missing role '{}'",
                    user.id(),
                    user.role_id()
                ))
            })?;

        Ok(UserAccount {
            user: user.clone(),
            role_name,
        })
    }

    /// Applies `update` to a copy of the user under the `roles` then `users`
    /// locks and stores it only when the result still resolves to a role.
    async fn update_user(
        &self,
        user_id: UserId,
        update: impl FnOnce(&HashMap<RoleId, StoredRole>, &mut User) -> AppResult<()> + Send,
    ) -> AppResult<UserAccount> {
        let roles = self.roles.read().await;
        let mut users = self.users.write().await;
        let mut user = users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' was not found")))?;

        update(&roles, &mut user)?;
        let account = Self::account(&roles, &user)?;
        users.insert(user_id, user);

        Ok(account)
    }
}

#[async_trait]
impl UserRepository for InMemoryAccessStore {
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<UserAccount>> {
        let roles = self.roles.read().await;
        let users = self.users.read().await;

        let mut accounts = users
            .values()
            .map(|user| Self::account(&roles, user))
            .collect::<AppResult<Vec<_>>>()?;
        accounts.sort_by(|left, right| left.user.email().as_str().cmp(right.user.email().as_str()));
        Ok(accounts)
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn create_user(&self, record: NewUserRecord) -> AppResult<UserAccount> {
        let roles = self.roles.read().await;
        let role_id = find_by_name(&roles, &record.role_name)
            .map(|stored| stored.role.id())
            .ok_or_else(|| role_not_found(&record.role_name))?;

        let mut users = self.users.write().await;
        if users.values().any(|user| user.email() == &record.email) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                record.email.as_str()
            )));
        }

        let user = User::new(
            UserId::new(),
            record.email,
            record.display_name,
            record.password_hash,
            true,
            role_id,
        )?;
        let account = Self::account(&roles, &user)?;
        users.insert(user.id(), user);

        Ok(account)
    }

    async fn assign_role(&self, user_id: UserId, role_name: &RoleName) -> AppResult<UserAccount> {
        self.update_user(user_id, |roles, user| {
            let role_id = find_by_name(roles, role_name)
                .map(|stored| stored.role.id())
                .ok_or_else(|| role_not_found(role_name))?;
            user.set_role(role_id);
            Ok(())
        })
        .await
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserAccount> {
        self.update_user(user_id, |_, user| {
            user.set_active(is_active);
            Ok(())
        })
        .await
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let password_hash = password_hash.to_owned();
        self.update_user(user_id, move |_, user| {
            user.set_password_hash(password_hash);
            Ok(())
        })
        .await?;
        Ok(())
    }
}
