use stockroom_domain::{AuditAction, validate_password};

use crate::AuditEvent;

use super::*;

impl UserService {
    /// Changes the password of the calling user.
    ///
    /// Requires the current password. Every session of the user is revoked
    /// afterwards, including the one used for this call.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let current_valid = self
            .password_hasher
            .verify_password(current_password, user.password_hash())?;

        if !current_valid {
            return Err(AppError::Unauthorized(
                "current password is incorrect".to_owned(),
            ));
        }

        if current_password == new_password {
            return Err(AppError::Validation(
                "new password must differ from the current password".to_owned(),
            ));
        }

        validate_password(new_password)?;

        let new_hash = self.password_hasher.hash_password(new_password)?;
        self.user_repository
            .update_password(user.id(), &new_hash)
            .await?;
        self.session_token_service
            .revoke_all_for_user(user.id())
            .await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: user.id().to_string(),
                action: AuditAction::UserPasswordChanged,
                resource_type: "user".to_owned(),
                resource_id: user.id().to_string(),
                detail: None,
            })
            .await
    }
}
