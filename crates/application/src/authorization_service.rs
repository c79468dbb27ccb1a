//! Access control resolver.
//!
//! Resolves a user's single role to its granted permissions and decides
//! whether a required permission is held. Each call performs at most one
//! repository read and keeps no state between calls, so grant changes are
//! visible on the next check.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use stockroom_core::AppResult;
use stockroom_domain::{PermissionName, Role, RoleId, RoleName};

mod permissions;


/// Role with its currently granted permissions, loaded in one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrants {
    /// Role record.
    pub role: Role,
    /// Canonical names of the granted permissions.
    pub permissions: Vec<PermissionName>,
}

/// Effective access of one user, used for profile views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveAccess {
    /// The user's role.
    pub role: Role,
    /// Permissions conferred by the role's explicit grants.
    pub permissions: BTreeSet<PermissionName>,
}

/// Repository port for role grant lookups.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Loads a role together with its grants. Returns `None` for unknown roles.
    async fn find_role_grants(&self, role_id: RoleId) -> AppResult<Option<RoleGrants>>;

    /// Finds a role by machine name. Returns `None` for unknown roles.
    async fn find_role_by_name(&self, role_name: &RoleName) -> AppResult<Option<Role>>;
}

/// Application service for authorization checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }
}
