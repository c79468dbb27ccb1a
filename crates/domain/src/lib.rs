//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission;
mod role;
mod security;
mod user;

pub use permission::{
    CatalogPermission, PERMISSION_NAME_MAX_LENGTH, PermissionDefinition, PermissionId,
    PermissionName,
};
pub use role::{
    ROLE_NAME_MAX_LENGTH, Role, RoleId, RoleKind, RoleName, SUPER_ADMIN_ROLE_NAME,
    normalize_description,
};
pub use security::{AccessDecision, AuditAction, DenyReason};
pub use user::{
    EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, User, UserId, validate_password,
};
