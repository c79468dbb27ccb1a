//! Row decoding shared by the PostgreSQL repositories.

use stockroom_core::{AppError, AppResult};
use stockroom_domain::{
    EmailAddress, PermissionName, Role, RoleId, RoleKind, RoleName, User, UserId,
};

/// Role columns selected as `role_id, role_name, role_display_name,
/// role_description, role_is_active, role_is_super_admin`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct RoleColumns {
    pub(crate) role_id: uuid::Uuid,
    pub(crate) role_name: String,
    pub(crate) role_display_name: String,
    pub(crate) role_description: Option<String>,
    pub(crate) role_is_active: bool,
    pub(crate) role_is_super_admin: bool,
}

impl RoleColumns {
    pub(crate) fn into_role(self) -> AppResult<Role> {
        let name = RoleName::new(self.role_name.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "invalid stored role name '{}': {error}",
                self.role_name
            ))
        })?;

        Role::new(
            RoleId::from_uuid(self.role_id),
            name,
            self.role_display_name,
            self.role_description,
            self.role_is_active,
            RoleKind::from_super_admin_flag(self.role_is_super_admin),
        )
    }
}

/// User columns selected from `users`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub(crate) id: uuid::Uuid,
    pub(crate) email: String,
    pub(crate) display_name: String,
    pub(crate) password_hash: String,
    pub(crate) is_active: bool,
    pub(crate) role_id: uuid::Uuid,
}

impl UserRow {
    pub(crate) fn into_user(self) -> AppResult<User> {
        let email = EmailAddress::new(self.email.as_str()).map_err(|error| {
            AppError::Internal(format!("invalid stored email '{}': {error}", self.email))
        })?;

        User::new(
            UserId::from_uuid(self.id),
            email,
            self.display_name,
            self.password_hash,
            self.is_active,
            RoleId::from_uuid(self.role_id),
        )
    }
}

pub(crate) fn decode_permission(value: &str) -> AppResult<PermissionName> {
    PermissionName::parse(value).map_err(|error| {
        AppError::Internal(format!("invalid stored permission '{value}': {error}"))
    })
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    has_sqlstate(error, "23505")
}

pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_sqlstate(error, "23503")
}

fn has_sqlstate(error: &sqlx::Error, code: &str) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(code)
    )
}
