use super::*;

use stockroom_domain::{AuditAction, PermissionName};

use crate::AuditEvent;

impl SecurityAdminService {
    /// Grants a permission to a role.
    ///
    /// Granting an already granted permission succeeds without an audit event
    /// and returns `false`.
    pub async fn grant_permission(
        &self,
        actor: &User,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        self.require(actor, CatalogPermission::RolesManage).await?;
        self.reject_super_admin_grant_change(role_name).await?;

        let inserted = self
            .repository
            .grant_permission(role_name, permission)
            .await?;

        if inserted {
            self.audit_repository
                .append_event(AuditEvent {
                    subject: actor.id().to_string(),
                    action: AuditAction::SecurityPermissionGranted,
                    resource_type: "role_grant".to_owned(),
                    resource_id: format!("{role_name}:{permission}"),
                    detail: Some(format!("granted '{permission}' to role '{role_name}'")),
                })
                .await?;
        }

        Ok(inserted)
    }

    /// Revokes a permission from a role.
    pub async fn revoke_permission(
        &self,
        actor: &User,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<()> {
        self.require(actor, CatalogPermission::RolesManage).await?;
        self.reject_super_admin_grant_change(role_name).await?;

        let removed = self
            .repository
            .revoke_permission(role_name, permission)
            .await?;

        if !removed {
            return Err(AppError::NotFound(format!(
                "role '{role_name}' does not hold permission '{permission}'"
            )));
        }

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::SecurityPermissionRevoked,
                resource_type: "role_grant".to_owned(),
                resource_id: format!("{role_name}:{permission}"),
                detail: Some(format!("revoked '{permission}' from role '{role_name}'")),
            })
            .await
    }

    async fn reject_super_admin_grant_change(&self, role_name: &RoleName) -> AppResult<()> {
        let role = self.require_existing_role(role_name).await?;
        if role.role.is_super_admin() {
            return Err(AppError::Validation(format!(
                "super-admin role '{role_name}' holds every permission implicitly"
            )));
        }

        Ok(())
    }
}
