use super::*;

use stockroom_domain::{AuditAction, PermissionDefinition, normalize_description};

use crate::AuditEvent;
use crate::security_admin_ports::{CreateRoleInput, UpdateRoleInput};

impl SecurityAdminService {
    /// Returns the permission catalog.
    pub async fn list_permissions(&self, actor: &User) -> AppResult<Vec<PermissionDefinition>> {
        self.require(actor, CatalogPermission::RolesView).await?;
        self.repository.list_permissions().await
    }

    /// Returns all roles with their grants.
    pub async fn list_roles(&self, actor: &User) -> AppResult<Vec<RoleDefinition>> {
        self.require(actor, CatalogPermission::RolesView).await?;
        self.repository.list_roles().await
    }

    /// Returns one role with its grants.
    pub async fn find_role(&self, actor: &User, role_name: &RoleName) -> AppResult<RoleDefinition> {
        self.require(actor, CatalogPermission::RolesView).await?;
        self.require_existing_role(role_name).await
    }

    /// Creates a role and emits an audit event.
    pub async fn create_role(
        &self,
        actor: &User,
        mut input: CreateRoleInput,
    ) -> AppResult<RoleDefinition> {
        self.require(actor, CatalogPermission::RolesManage).await?;

        if input.display_name.trim().is_empty() {
            return Err(AppError::Validation(
                "role display name must not be empty".to_owned(),
            ));
        }
        input.description = normalize_description(input.description);
        input.permissions.sort();
        input.permissions.dedup();

        let role = self.repository.create_role(input).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::SecurityRoleCreated,
                resource_type: "role".to_owned(),
                resource_id: role.role.name().to_string(),
                detail: Some(format!(
                    "created role '{}' with {} grants",
                    role.role.name(),
                    role.permissions.len()
                )),
            })
            .await?;

        Ok(role)
    }

    /// Replaces display name, description and active flag of a role.
    ///
    /// The super-admin role cannot be deactivated.
    pub async fn update_role(
        &self,
        actor: &User,
        role_name: &RoleName,
        mut input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        self.require(actor, CatalogPermission::RolesManage).await?;

        let existing = self.require_existing_role(role_name).await?;
        if existing.role.is_super_admin() && !input.is_active {
            return Err(AppError::Conflict(format!(
                "super-admin role '{role_name}' cannot be deactivated"
            )));
        }

        if input.display_name.trim().is_empty() {
            return Err(AppError::Validation(
                "role display name must not be empty".to_owned(),
            ));
        }
        input.description = normalize_description(input.description);

        let role = self.repository.update_role(role_name, input).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::SecurityRoleUpdated,
                resource_type: "role".to_owned(),
                resource_id: role_name.to_string(),
                detail: Some(format!(
                    "updated role '{role_name}' (is_active={})",
                    role.role.is_active()
                )),
            })
            .await?;

        Ok(role)
    }

    /// Deletes a role that no user references.
    pub async fn delete_role(&self, actor: &User, role_name: &RoleName) -> AppResult<()> {
        self.require(actor, CatalogPermission::RolesManage).await?;

        let existing = self.require_existing_role(role_name).await?;
        if existing.role.is_super_admin() {
            return Err(AppError::Conflict(format!(
                "super-admin role '{role_name}' cannot be deleted"
            )));
        }

        if existing.user_count > 0 {
            return Err(AppError::Conflict(format!(
                "role '{role_name}' is still assigned to {} users",
                existing.user_count
            )));
        }

        self.repository.delete_role(role_name).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::SecurityRoleDeleted,
                resource_type: "role".to_owned(),
                resource_id: role_name.to_string(),
                detail: Some(format!("deleted role '{role_name}'")),
            })
            .await
    }
}
