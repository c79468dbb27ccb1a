use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use stockroom_domain::{PermissionName, RoleName, User};

use crate::dto::{
    AuditLogEntryResponse, AuditLogQueryParams, CreateRoleRequest, PermissionResponse,
    RoleResponse, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod audit;
mod grants;
mod roles;

#[cfg(test)]
mod tests;

pub use audit::list_audit_log_handler;
pub use grants::{grant_permission_handler, revoke_permission_handler};
pub use roles::{
    create_role_handler, delete_role_handler, get_role_handler, list_permissions_handler,
    list_roles_handler, update_role_handler,
};
