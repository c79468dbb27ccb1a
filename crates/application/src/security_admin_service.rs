//! Role, grant and audit administration.

use std::sync::Arc;

use stockroom_core::{AppError, AppResult};
use stockroom_domain::{CatalogPermission, RoleName, User};
use tracing::warn;

use crate::security_admin_ports::{RoleDefinition, SecurityAdminRepository};
use crate::{AuditLogRepository, AuditRepository, AuthorizationService};

mod audit;
mod grants;
mod roles;

#[cfg(test)]
mod tests;

/// Application service for security administration workflows.
#[derive(Clone)]
pub struct SecurityAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn SecurityAdminRepository>,
    audit_log_repository: Arc<dyn AuditLogRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SecurityAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn SecurityAdminRepository>,
        audit_log_repository: Arc<dyn AuditLogRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            audit_log_repository,
            audit_repository,
        }
    }

    async fn require(&self, actor: &User, permission: CatalogPermission) -> AppResult<()> {
        let result = self
            .authorization_service
            .require_permission(actor, &permission.name())
            .await;

        if let Err(AppError::Forbidden(_) | AppError::AccountInactive(_)) = &result {
            warn!(
                user_id = %actor.id(),
                permission = permission.as_str(),
                "security administration request denied"
            );
        }

        result
    }

    async fn require_existing_role(&self, role_name: &RoleName) -> AppResult<RoleDefinition> {
        self.repository
            .find_role(role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))
    }
}
