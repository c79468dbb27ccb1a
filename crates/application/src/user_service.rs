//! User accounts, credentials and sessions.
//!
//! Login never reveals whether an email is registered: unknown emails and
//! wrong passwords produce the same outcome after spending one hash.

use std::sync::Arc;

use async_trait::async_trait;

use stockroom_core::{AppError, AppResult};
use stockroom_domain::{CatalogPermission, EmailAddress, RoleName, User, UserId};
use tracing::warn;

use crate::{AuditRepository, AuthorizationService, SessionTokenService};

mod activation;
mod bootstrap;
mod login;
mod password;
mod provisioning;


pub use bootstrap::BootstrapAdminInput;
pub use provisioning::ProvisionUserInput;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User together with the machine name of its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// User record.
    pub user: User,
    /// Name of the assigned role.
    pub role_name: RoleName,
}

/// Insert payload for a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Canonical email address.
    pub email: EmailAddress,
    /// Display name.
    pub display_name: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// Role to assign.
    pub role_name: RoleName,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by canonical email.
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Lists all users ordered by email.
    async fn list_users(&self) -> AppResult<Vec<UserAccount>>;

    /// Counts all users.
    async fn count_users(&self) -> AppResult<u64>;

    /// Creates an active user.
    ///
    /// Fails with `Conflict` for duplicate emails and `NotFound` for unknown
    /// roles.
    async fn create_user(&self, record: NewUserRecord) -> AppResult<UserAccount>;

    /// Re-assigns a user's role.
    async fn assign_role(&self, user_id: UserId, role_name: &RoleName) -> AppResult<UserAccount>;

    /// Sets the active flag.
    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserAccount>;

    /// Replaces the password hash.
    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()>;
}

/// Port for password hashing. Keeps the application free of direct
/// cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password using Argon2id.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Authentication outcome
// ---------------------------------------------------------------------------

/// Result of a login attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Credentials are valid and the account is active.
    Authenticated(User),
    /// Credentials are valid but the account is deactivated.
    Inactive,
    /// Unknown email or wrong password.
    Failed,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for user management and authentication.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    authorization_service: AuthorizationService,
    session_token_service: SessionTokenService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        authorization_service: AuthorizationService,
        session_token_service: SessionTokenService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            authorization_service,
            session_token_service,
            audit_repository,
        }
    }

    /// Returns a user by id. Used by the bearer-token guard.
    pub async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.user_repository.find_by_id(user_id).await
    }

    /// Lists all user accounts.
    pub async fn list_users(&self, actor: &User) -> AppResult<Vec<UserAccount>> {
        self.require(actor, CatalogPermission::UsersView).await?;
        self.user_repository.list_users().await
    }

    async fn require(&self, actor: &User, permission: CatalogPermission) -> AppResult<()> {
        let result = self
            .authorization_service
            .require_permission(actor, &permission.name())
            .await;

        if let Err(AppError::Forbidden(_) | AppError::AccountInactive(_)) = &result {
            warn!(
                user_id = %actor.id(),
                permission = permission.as_str(),
                "user administration request denied"
            );
        }

        result
    }
}
