use stockroom_domain::AuditAction;

use crate::AuditEvent;

use super::*;

impl UserService {
    /// Re-assigns a user's single role.
    ///
    /// Only super-admins may hand out the super-admin role or take it away.
    pub async fn assign_role(
        &self,
        actor: &User,
        user_id: UserId,
        role_name: &RoleName,
    ) -> AppResult<UserAccount> {
        self.require(actor, CatalogPermission::UsersManage).await?;
        self.require_super_admin_for_target(actor, user_id).await?;
        self.require_super_admin_for_role(actor, role_name).await?;

        let account = self.user_repository.assign_role(user_id, role_name).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::UserRoleAssigned,
                resource_type: "user".to_owned(),
                resource_id: user_id.to_string(),
                detail: Some(format!("assigned role '{role_name}'")),
            })
            .await?;

        Ok(account)
    }

    /// Activates or deactivates an account.
    ///
    /// Deactivation revokes every session of the target user. Users cannot
    /// deactivate themselves, and only super-admins may change the active flag
    /// of a super-admin account.
    pub async fn set_user_active(
        &self,
        actor: &User,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserAccount> {
        self.require(actor, CatalogPermission::UsersManage).await?;

        if !is_active && actor.id() == user_id {
            return Err(AppError::Validation(
                "users cannot deactivate their own account".to_owned(),
            ));
        }
        self.require_super_admin_for_target(actor, user_id).await?;

        let account = self.user_repository.set_active(user_id, is_active).await?;
        if !is_active {
            self.session_token_service
                .revoke_all_for_user(user_id)
                .await?;
        }

        let action = if is_active {
            AuditAction::UserActivated
        } else {
            AuditAction::UserDeactivated
        };
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action,
                resource_type: "user".to_owned(),
                resource_id: user_id.to_string(),
                detail: None,
            })
            .await?;

        Ok(account)
    }

    pub(super) async fn require_super_admin_for_role(
        &self,
        actor: &User,
        role_name: &RoleName,
    ) -> AppResult<()> {
        match self.authorization_service.find_role(role_name).await? {
            Some(role) if role.is_super_admin() => self.require_super_admin(actor).await,
            _ => Ok(()),
        }
    }

    async fn require_super_admin_for_target(
        &self,
        actor: &User,
        user_id: UserId,
    ) -> AppResult<()> {
        let Some(target) = self.user_repository.find_by_id(user_id).await? else {
            return Ok(());
        };

        if self.authorization_service.role_of(&target).await?.is_super_admin() {
            self.require_super_admin(actor).await
        } else {
            Ok(())
        }
    }

    async fn require_super_admin(&self, actor: &User) -> AppResult<()> {
        if self.authorization_service.role_of(actor).await?.is_super_admin() {
            return Ok(());
        }

        warn!(user_id = %actor.id(), "super-admin account change denied");
        Err(AppError::Forbidden(
            "only super-admins may grant, revoke or change super-admin access".to_owned(),
        ))
    }
}
