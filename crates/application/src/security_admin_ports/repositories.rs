use async_trait::async_trait;

use stockroom_core::AppResult;
use stockroom_domain::{PermissionDefinition, PermissionName, RoleName};

use super::roles::{CreateRoleInput, RoleDefinition, UpdateRoleInput};

/// Repository port for role, grant and catalog administration.
///
/// Grant and revoke writes against the same role must be serialized by the
/// implementation.
#[async_trait]
pub trait SecurityAdminRepository: Send + Sync {
    /// Lists the permission catalog ordered by category and name.
    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>>;

    /// Lists all roles with grants, ordered by name.
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>>;

    /// Finds one role by machine name.
    async fn find_role(&self, role_name: &RoleName) -> AppResult<Option<RoleDefinition>>;

    /// Creates a standard role and attaches grants.
    ///
    /// Fails with `Conflict` on duplicate names and `Validation` when a
    /// permission is not in the catalog.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition>;

    /// Replaces mutable role attributes.
    async fn update_role(
        &self,
        role_name: &RoleName,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition>;

    /// Deletes a role. Fails with `Conflict` while any user references it.
    async fn delete_role(&self, role_name: &RoleName) -> AppResult<()>;

    /// Grants a catalog permission to a role.
    ///
    /// Returns `false` when the grant already existed.
    async fn grant_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool>;

    /// Revokes a permission from a role.
    ///
    /// Returns `false` when the role did not hold the grant.
    async fn revoke_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool>;
}
