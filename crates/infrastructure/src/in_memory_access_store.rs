//! In-memory implementation of every access-control port.
//!
//! Seeds the permission catalog and the super-admin role on construction.
//! When several locks are held, `roles` is always taken first.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use stockroom_application::{AuditLogEntry, SessionTokenRecord};
use stockroom_core::{AppError, AppResult};
use stockroom_domain::{
    CatalogPermission, PermissionDefinition, PermissionId, PermissionName, Role, RoleId,
    RoleKind, RoleName, SUPER_ADMIN_ROLE_NAME, User, UserId,
};
use tokio::sync::RwLock;

mod audit;
mod roles;
mod sessions;
mod users;


#[derive(Debug, Clone)]
struct StoredRole {
    role: Role,
    permissions: BTreeSet<PermissionName>,
}

/// In-memory access store.
#[derive(Debug)]
pub struct InMemoryAccessStore {
    permissions: RwLock<BTreeMap<PermissionName, PermissionDefinition>>,
    roles: RwLock<HashMap<RoleId, StoredRole>>,
    users: RwLock<HashMap<UserId, User>>,
    tokens: RwLock<HashMap<String, SessionTokenRecord>>,
    audit_entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAccessStore {
    /// Creates a store holding the seeded catalog and super-admin role.
    pub fn new() -> AppResult<Self> {
        let mut permissions = BTreeMap::new();
        for permission in CatalogPermission::all() {
            permissions.insert(
                permission.name(),
                PermissionDefinition::new(
                    PermissionId::new(),
                    permission.name(),
                    permission.display_name(),
                    permission.category(),
                )?,
            );
        }

        let super_admin = Role::new(
            RoleId::new(),
            RoleName::new(SUPER_ADMIN_ROLE_NAME)?,
            "Super admin",
            Some("Passes every permission check regardless of grants.".to_owned()),
            true,
            RoleKind::SuperAdmin,
        )?;
        let mut roles = HashMap::new();
        roles.insert(
            super_admin.id(),
            StoredRole {
                role: super_admin,
                permissions: BTreeSet::new(),
            },
        );

        Ok(Self {
            permissions: RwLock::new(permissions),
            roles: RwLock::new(roles),
            users: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
            audit_entries: RwLock::new(Vec::new()),
        })
    }
}

fn find_by_name<'a>(
    roles: &'a HashMap<RoleId, StoredRole>,
    role_name: &RoleName,
) -> Option<&'a StoredRole> {
    roles.values().find(|stored| stored.role.name() == role_name)
}

fn role_not_found(role_name: &RoleName) -> AppError {
    AppError::NotFound(format!("role '{role_name}' was not found"))
}
