//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod security_admin_ports;
mod security_admin_service;
mod session_token_service;
mod user_service;

pub use audit_ports::{
    AUDIT_LOG_MAX_LIMIT, AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository,
    AuditRepository,
};
pub use authorization_service::{
    AuthorizationRepository, AuthorizationService, EffectiveAccess, RoleGrants,
};
pub use security_admin_ports::{
    CreateRoleInput, RoleDefinition, SecurityAdminRepository, UpdateRoleInput,
};
pub use security_admin_service::SecurityAdminService;
pub use session_token_service::{
    DEFAULT_SESSION_TOKEN_TTL_MINUTES, IssuedSessionToken, MAX_SESSION_TOKEN_TTL_MINUTES,
    SessionTokenRecord, SessionTokenRepository, SessionTokenService,
};
pub use user_service::{
    AuthOutcome, BootstrapAdminInput, NewUserRecord, PasswordHasher, ProvisionUserInput,
    UserAccount, UserRepository, UserService,
};
