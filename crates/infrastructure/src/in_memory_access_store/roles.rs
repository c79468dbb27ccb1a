use async_trait::async_trait;
use stockroom_application::{
    AuthorizationRepository, CreateRoleInput, RoleDefinition, RoleGrants,
    SecurityAdminRepository, UpdateRoleInput,
};

use super::*;

impl StoredRole {
    fn definition(&self, users: &HashMap<UserId, User>) -> RoleDefinition {
        let user_count = users
            .values()
            .filter(|user| user.role_id() == self.role.id())
            .count();

        RoleDefinition {
            role: self.role.clone(),
            permissions: self.permissions.iter().cloned().collect(),
            user_count: user_count as u64,
        }
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryAccessStore {
    async fn find_role_grants(&self, role_id: RoleId) -> AppResult<Option<RoleGrants>> {
        Ok(self
            .roles
            .read()
            .await
            .get(&role_id)
            .map(|stored| RoleGrants {
                role: stored.role.clone(),
                permissions: stored.permissions.iter().cloned().collect(),
            }))
    }

    async fn find_role_by_name(&self, role_name: &RoleName) -> AppResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(find_by_name(&roles, role_name).map(|stored| stored.role.clone()))
    }
}

#[async_trait]
impl SecurityAdminRepository for InMemoryAccessStore {
    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>> {
        let mut permissions: Vec<PermissionDefinition> =
            self.permissions.read().await.values().cloned().collect();
        permissions.sort_by(|left, right| {
            left.category()
                .as_str()
                .cmp(right.category().as_str())
                .then_with(|| left.name().cmp(right.name()))
        });
        Ok(permissions)
    }

    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        let roles = self.roles.read().await;
        let users = self.users.read().await;

        let mut definitions: Vec<RoleDefinition> = roles
            .values()
            .map(|stored| stored.definition(&users))
            .collect();
        definitions.sort_by(|left, right| left.role.name().cmp(right.role.name()));
        Ok(definitions)
    }

    async fn find_role(&self, role_name: &RoleName) -> AppResult<Option<RoleDefinition>> {
        let roles = self.roles.read().await;
        let users = self.users.read().await;

        Ok(find_by_name(&roles, role_name).map(|stored| stored.definition(&users)))
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.write().await;
        if find_by_name(&roles, &input.name).is_some() {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                input.name
            )));
        }

        let catalog = self.permissions.read().await;
        if let Some(unknown) = input
            .permissions
            .iter()
            .find(|permission| !catalog.contains_key(*permission))
        {
            return Err(AppError::Validation(format!(
                "permission '{unknown}' is not in the catalog"
            )));
        }

        let stored = StoredRole {
            role: Role::new(
                RoleId::new(),
                input.name,
                input.display_name,
                input.description,
                true,
                RoleKind::Standard,
            )?,
            permissions: input.permissions.into_iter().collect(),
        };
        let definition = stored.definition(&HashMap::new());
        roles.insert(stored.role.id(), stored);

        Ok(definition)
    }

    async fn update_role(
        &self,
        role_name: &RoleName,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.write().await;
        let role_id = find_by_name(&roles, role_name)
            .map(|stored| stored.role.id())
            .ok_or_else(|| role_not_found(role_name))?;

        let stored = roles
            .get_mut(&role_id)
            .ok_or_else(|| role_not_found(role_name))?;
        stored.role = Role::new(
            role_id,
            role_name.clone(),
            input.display_name,
            input.description,
            input.is_active,
            stored.role.kind(),
        )?;

        let users = self.users.read().await;
        Ok(stored.definition(&users))
    }

    async fn delete_role(&self, role_name: &RoleName) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        let role_id = find_by_name(&roles, role_name)
            .map(|stored| stored.role.id())
            .ok_or_else(|| role_not_found(role_name))?;

        let users = self.users.read().await;
        if users.values().any(|user| user.role_id() == role_id) {
            return Err(AppError::Conflict(format!(
                "role '{role_name}' is still assigned to users"
            )));
        }

        roles.remove(&role_id);
        Ok(())
    }

    async fn grant_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        let mut roles = self.roles.write().await;
        if !self.permissions.read().await.contains_key(permission) {
            return Err(AppError::NotFound(format!(
                "permission '{permission}' is not in the catalog"
            )));
        }

        let stored = roles
            .values_mut()
            .find(|stored| stored.role.name() == role_name)
            .ok_or_else(|| role_not_found(role_name))?;
        Ok(stored.permissions.insert(permission.clone()))
    }

    async fn revoke_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        let mut roles = self.roles.write().await;
        let stored = roles
            .values_mut()
            .find(|stored| stored.role.name() == role_name)
            .ok_or_else(|| role_not_found(role_name))?;
        Ok(stored.permissions.remove(permission))
    }
}
