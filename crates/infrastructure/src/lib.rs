//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_access_store;
mod postgres_audit_log_repository;
mod postgres_audit_repository;
mod postgres_authorization_repository;
mod postgres_rows;
mod postgres_security_admin_repository;
mod postgres_session_token_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_access_store::InMemoryAccessStore;
pub use postgres_audit_log_repository::PostgresAuditLogRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_security_admin_repository::PostgresSecurityAdminRepository;
pub use postgres_session_token_repository::PostgresSessionTokenRepository;
pub use postgres_user_repository::PostgresUserRepository;
