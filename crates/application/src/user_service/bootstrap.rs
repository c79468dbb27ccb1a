use stockroom_domain::{AuditAction, SUPER_ADMIN_ROLE_NAME};
use tracing::info;

use crate::AuditEvent;

use super::*;

/// Credentials for the first super-admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAdminInput {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub display_name: String,
}

impl UserService {
    /// Creates the first account with the super-admin role.
    ///
    /// Does nothing once any user exists and returns `None` in that case.
    pub async fn bootstrap_super_admin(
        &self,
        input: BootstrapAdminInput,
    ) -> AppResult<Option<UserAccount>> {
        if self.user_repository.count_users().await? > 0 {
            info!("users already exist, skipping super-admin bootstrap");
            return Ok(None);
        }

        let account = self
            .create_account(ProvisionUserInput {
                email: input.email,
                display_name: input.display_name,
                password: input.password,
                role_name: RoleName::new(SUPER_ADMIN_ROLE_NAME)?,
            })
            .await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: "system".to_owned(),
                action: AuditAction::UserProvisioned,
                resource_type: "user".to_owned(),
                resource_id: account.user.id().to_string(),
                detail: Some("bootstrapped super-admin".to_owned()),
            })
            .await?;

        info!(user_id = %account.user.id(), "bootstrapped super-admin account");
        Ok(Some(account))
    }
}
