use stockroom_core::AppError;
use stockroom_domain::{AccessDecision, DenyReason, Role, RoleName, User};
use tracing::{debug, error};

use super::*;

impl AuthorizationService {
    /// Returns the permissions currently granted to the user's role.
    ///
    /// Fails with [`AppError::DataIntegrity`] when the user's role reference
    /// is dangling.
    pub async fn resolve_permissions(&self, user: &User) -> AppResult<BTreeSet<PermissionName>> {
        let grants = self.load_role_grants(user).await?;
        Ok(effective_permissions(&grants))
    }

    /// Decides whether the user may perform an action gated by `required`.
    ///
    /// Expected outcomes, including denials, are returned as values. Only a
    /// dangling role reference or a repository failure is an error.
    pub async fn authorize(
        &self,
        user: &User,
        required: &PermissionName,
    ) -> AppResult<AccessDecision> {
        if !user.is_active() {
            debug!(user_id = %user.id(), permission = %required, "denied inactive user");
            return Ok(AccessDecision::Deny(DenyReason::UserInactive));
        }

        let grants = self.load_role_grants(user).await?;

        if grants.role.is_super_admin() {
            debug!(user_id = %user.id(), permission = %required, "allowed super-admin");
            return Ok(AccessDecision::Allow);
        }

        let decision = if effective_permissions(&grants).contains(required) {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny(DenyReason::PermissionMissing)
        };

        debug!(
            user_id = %user.id(),
            role = %grants.role.name(),
            permission = %required,
            allowed = decision.is_allowed(),
            "resolved authorization decision"
        );

        Ok(decision)
    }

    /// Ensures the user holds the required permission.
    ///
    /// Maps [`DenyReason::UserInactive`] to [`AppError::AccountInactive`] and
    /// [`DenyReason::PermissionMissing`] to [`AppError::Forbidden`].
    pub async fn require_permission(&self, user: &User, required: &PermissionName) -> AppResult<()> {
        match self.authorize(user, required).await? {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(DenyReason::UserInactive) => Err(AppError::AccountInactive(
                format!("user '{}' is deactivated", user.id()),
            )),
            AccessDecision::Deny(DenyReason::PermissionMissing) => Err(AppError::Forbidden(
                format!("missing required permission '{required}'"),
            )),
        }
    }

    /// Returns the user's role and the permissions it confers.
    pub async fn effective_access(&self, user: &User) -> AppResult<EffectiveAccess> {
        let grants = self.load_role_grants(user).await?;
        let permissions = effective_permissions(&grants);

        Ok(EffectiveAccess {
            role: grants.role,
            permissions,
        })
    }

    /// Returns the role currently assigned to the user.
    pub async fn role_of(&self, user: &User) -> AppResult<Role> {
        Ok(self.load_role_grants(user).await?.role)
    }

    /// Finds a role by machine name.
    pub async fn find_role(&self, role_name: &RoleName) -> AppResult<Option<Role>> {
        self.repository.find_role_by_name(role_name).await
    }

    async fn load_role_grants(&self, user: &User) -> AppResult<RoleGrants> {
        self.repository
            .find_role_grants(user.role_id())
            .await?
            .ok_or_else(|| {
                error!(
                    user_id = %user.id(),
                    role_id = %user.role_id(),
                    "user references a role that does not exist"
                );
                AppError::DataIntegrity(format!(
                    "user '{}' references missing role '{}'",
                    user.id(),
                    user.role_id()
                ))
            })
    }
}

fn effective_permissions(grants: &RoleGrants) -> BTreeSet<PermissionName> {
    grants.permissions.iter().cloned().collect()
}
