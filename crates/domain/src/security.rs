use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stockroom_core::AppError;

/// Why an authorization check denied access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The account exists but is deactivated.
    UserInactive,
    /// The user's role does not grant the required permission.
    PermissionMissing,
}

impl DenyReason {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserInactive => "user_inactive",
            Self::PermissionMissing => "permission_missing",
        }
    }
}

/// Outcome of one authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The action is permitted.
    Allow,
    /// The action is rejected for the given reason.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Returns whether the decision permits the action.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the deny reason, if any.
    #[must_use]
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(*reason),
        }
    }
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role is created.
    SecurityRoleCreated,
    /// Emitted when role attributes change.
    SecurityRoleUpdated,
    /// Emitted when a role is deleted.
    SecurityRoleDeleted,
    /// Emitted when a permission is granted to a role.
    SecurityPermissionGranted,
    /// Emitted when a permission is revoked from a role.
    SecurityPermissionRevoked,
    /// Emitted when an account is provisioned.
    UserProvisioned,
    /// Emitted when a user's role changes.
    UserRoleAssigned,
    /// Emitted when an account is re-activated.
    UserActivated,
    /// Emitted when an account is deactivated.
    UserDeactivated,
    /// Emitted when a user changes their password.
    UserPasswordChanged,
    /// Emitted when a bearer token is issued at login.
    AuthSessionStarted,
    /// Emitted when a bearer token is revoked at logout.
    AuthSessionEnded,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityRoleCreated => "security.role.created",
            Self::SecurityRoleUpdated => "security.role.updated",
            Self::SecurityRoleDeleted => "security.role.deleted",
            Self::SecurityPermissionGranted => "security.permission.granted",
            Self::SecurityPermissionRevoked => "security.permission.revoked",
            Self::UserProvisioned => "user.provisioned",
            Self::UserRoleAssigned => "user.role_assigned",
            Self::UserActivated => "user.activated",
            Self::UserDeactivated => "user.deactivated",
            Self::UserPasswordChanged => "user.password_changed",
            Self::AuthSessionStarted => "auth.session.started",
            Self::AuthSessionEnded => "auth.session.ended",
        }
    }

    /// Returns all audit actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AuditAction] = &[
            AuditAction::SecurityRoleCreated,
            AuditAction::SecurityRoleUpdated,
            AuditAction::SecurityRoleDeleted,
            AuditAction::SecurityPermissionGranted,
            AuditAction::SecurityPermissionRevoked,
            AuditAction::UserProvisioned,
            AuditAction::UserRoleAssigned,
            AuditAction::UserActivated,
            AuditAction::UserDeactivated,
            AuditAction::UserPasswordChanged,
            AuditAction::AuthSessionStarted,
            AuditAction::AuthSessionEnded,
        ];

        ALL
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown audit action '{value}'")))
    }
}
