use stockroom_core::NonEmptyString;
use stockroom_domain::{AuditAction, validate_password};

use crate::AuditEvent;

use super::*;

/// Input payload for provisioning an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionUserInput {
    /// Email address; canonicalized before storage.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Initial plaintext password.
    pub password: String,
    /// Role to assign.
    pub role_name: RoleName,
}

impl UserService {
    /// Creates an active account on behalf of an administrator.
    pub async fn provision_user(
        &self,
        actor: &User,
        input: ProvisionUserInput,
    ) -> AppResult<UserAccount> {
        self.require(actor, CatalogPermission::UsersManage).await?;
        self.require_super_admin_for_role(actor, &input.role_name)
            .await?;

        let account = self.create_account(input).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::UserProvisioned,
                resource_type: "user".to_owned(),
                resource_id: account.user.id().to_string(),
                detail: Some(format!(
                    "provisioned '{}' with role '{}'",
                    account.user.email().as_str(),
                    account.role_name
                )),
            })
            .await?;

        Ok(account)
    }

    pub(super) async fn create_account(&self, input: ProvisionUserInput) -> AppResult<UserAccount> {
        let email = EmailAddress::new(input.email)?;
        let display_name = NonEmptyString::new(input.display_name)?;
        validate_password(&input.password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                email.as_str()
            )));
        }

        let password_hash = self.password_hasher.hash_password(&input.password)?;
        self.user_repository
            .create_user(NewUserRecord {
                email,
                display_name: display_name.into(),
                password_hash,
                role_name: input.role_name,
            })
            .await
    }
}
