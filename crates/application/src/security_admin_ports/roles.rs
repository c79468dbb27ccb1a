use stockroom_domain::{PermissionName, Role, RoleName};

/// Role definition returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Role record.
    pub role: Role,
    /// Explicit grants, sorted by name.
    pub permissions: Vec<PermissionName>,
    /// Number of users currently assigned to the role.
    pub user_count: u64,
}

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique machine name.
    pub name: RoleName,
    /// Human-readable name.
    pub display_name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Grants to attach to the role.
    pub permissions: Vec<PermissionName>,
}

/// Input payload for replacing mutable role attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// Human-readable name.
    pub display_name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Whether the role confers its grants.
    pub is_active: bool,
}
