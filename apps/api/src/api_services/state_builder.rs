use std::sync::Arc;

use sqlx::PgPool;
use stockroom_application::{
    AuthorizationService, SecurityAdminService, SessionTokenService, UserService,
};
use stockroom_infrastructure::{
    Argon2PasswordHasher, PostgresAuditLogRepository, PostgresAuditRepository,
    PostgresAuthorizationRepository, PostgresSecurityAdminRepository,
    PostgresSessionTokenRepository, PostgresUserRepository,
};

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let audit_repository = Arc::new(PostgresAuditRepository::new(pool.clone()));
    let authorization_service = AuthorizationService::new(Arc::new(
        PostgresAuthorizationRepository::new(pool.clone()),
    ));

    let security_admin_service = SecurityAdminService::new(
        authorization_service.clone(),
        Arc::new(PostgresSecurityAdminRepository::new(pool.clone())),
        Arc::new(PostgresAuditLogRepository::new(pool.clone())),
        audit_repository.clone(),
    );

    let session_token_service = SessionTokenService::new(
        Arc::new(PostgresSessionTokenRepository::new(pool.clone())),
        config.session_token_ttl_minutes,
    );

    let user_service = UserService::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        authorization_service.clone(),
        session_token_service,
        audit_repository,
    );

    AppState {
        authorization_service,
        security_admin_service,
        user_service,
    }
}
