use stockroom_domain::AuditAction;
use tracing::info;

use crate::{AuditEvent, IssuedSessionToken};

use super::*;

impl UserService {
    /// Authenticates a user with email and password.
    ///
    /// The inactive outcome is only reported after the password verified, so
    /// it does not leak account existence.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let Ok(email) = EmailAddress::new(email) else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(AuthOutcome::Failed);
        };

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            let _ = self.password_hasher.hash_password(password);
            info!("login failed for unknown email");
            return Ok(AuthOutcome::Failed);
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, user.password_hash())?;

        if !password_valid {
            info!(user_id = %user.id(), "login failed with invalid password");
            return Ok(AuthOutcome::Failed);
        }

        if !user.is_active() {
            info!(user_id = %user.id(), "login refused for inactive account");
            return Ok(AuthOutcome::Inactive);
        }

        Ok(AuthOutcome::Authenticated(user))
    }

    /// Issues a bearer token for an authenticated user.
    pub async fn start_session(&self, user: &User) -> AppResult<IssuedSessionToken> {
        let issued = self.session_token_service.issue(user.id()).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: user.id().to_string(),
                action: AuditAction::AuthSessionStarted,
                resource_type: "session".to_owned(),
                resource_id: user.id().to_string(),
                detail: None,
            })
            .await?;

        Ok(issued)
    }

    /// Revokes the bearer token used by the current request.
    pub async fn end_session(&self, user: &User, raw_token: &str) -> AppResult<()> {
        self.session_token_service.revoke(raw_token).await?;

        self.audit_repository
            .append_event(AuditEvent {
                subject: user.id().to_string(),
                action: AuditAction::AuthSessionEnded,
                resource_type: "session".to_owned(),
                resource_id: user.id().to_string(),
                detail: None,
            })
            .await
    }

    /// Resolves a bearer token to its user.
    ///
    /// Tokens whose user no longer exists are treated as invalid.
    pub async fn authenticate_token(&self, raw_token: &str) -> AppResult<User> {
        let user_id = self.session_token_service.resolve(raw_token).await?;

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired session token".to_owned()))
    }
}
