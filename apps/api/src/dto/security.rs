use serde::{Deserialize, Serialize};
use stockroom_application::{AuditLogEntry, RoleDefinition};
use stockroom_domain::PermissionDefinition;
use ts_rs::TS;

/// API representation of a catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub permission_id: String,
    pub name: String,
    pub display_name: String,
    pub category: String,
}

impl From<PermissionDefinition> for PermissionResponse {
    fn from(value: PermissionDefinition) -> Self {
        Self {
            permission_id: value.id().as_uuid().to_string(),
            name: value.name().as_str().to_owned(),
            display_name: value.display_name().as_str().to_owned(),
            category: value.category().as_str().to_owned(),
        }
    }
}

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Incoming payload for role updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

/// API representation of a role and its grants.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub role_id: String,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_super_admin: bool,
    pub permissions: Vec<String>,
    #[ts(type = "number")]
    pub user_count: u64,
}

impl From<RoleDefinition> for RoleResponse {
    fn from(value: RoleDefinition) -> Self {
        Self {
            role_id: value.role.id().to_string(),
            name: value.role.name().as_str().to_owned(),
            display_name: value.role.display_name().as_str().to_owned(),
            description: value.role.description().map(str::to_owned),
            is_active: value.role.is_active(),
            is_super_admin: value.role.is_super_admin(),
            permissions: value.permissions.into_iter().map(String::from).collect(),
            user_count: value.user_count,
        }
    }
}

/// Query string for audit log listing.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-query.ts"
)]
pub struct AuditLogQueryParams {
    #[ts(type = "number | null")]
    pub limit: Option<usize>,
    #[ts(type = "number | null")]
    pub offset: Option<usize>,
    pub action: Option<String>,
    pub subject: Option<String>,
}

/// API representation of an audit log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub event_id: String,
    pub subject: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub detail: Option<String>,
    pub created_at: String,
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            event_id: value.event_id,
            subject: value.subject,
            action: value.action,
            resource_type: value.resource_type,
            resource_id: value.resource_id,
            detail: value.detail,
            created_at: value.created_at,
        }
    }
}
