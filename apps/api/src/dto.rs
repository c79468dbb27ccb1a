mod auth;
mod common;
mod security;
mod users;

pub use auth::{AuthLoginRequest, AuthLoginResponse, ChangePasswordRequest, CurrentUserResponse};
pub use common::{AccessCheckQuery, AccessCheckResponse, HealthResponse};
pub use security::{
    AuditLogEntryResponse, AuditLogQueryParams, CreateRoleRequest, PermissionResponse,
    RoleResponse, UpdateRoleRequest,
};
pub use users::{
    AssignUserRoleRequest, CreateUserRequest, SetUserActiveRequest, UserResponse,
};
