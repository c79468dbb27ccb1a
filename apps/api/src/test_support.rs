use std::sync::Arc;

use axum::response::Response;
use stockroom_application::{
    AuthorizationService, BootstrapAdminInput, PasswordHasher, SecurityAdminService,
    SessionTokenService, UserService,
};
use stockroom_core::AppResult;
use stockroom_domain::{PermissionName, RoleName, User};
use stockroom_infrastructure::InMemoryAccessStore;

use crate::state::AppState;

pub const ADMIN_EMAIL: &str = "bob@example.com";
pub const ADMIN_PASSWORD: &str = "root-password-42";

/// Reversible hasher keeping handler tests fast.
struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("test-hash:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("test-hash:") == Some(password))
    }
}

pub fn in_memory_state() -> (AppState, Arc<InMemoryAccessStore>) {
    let store = Arc::new(
        InMemoryAccessStore::new().unwrap_or_else(|error| panic!("store should seed: {error}")),
    );
    let authorization_service = AuthorizationService::new(store.clone());
    let security_admin_service = SecurityAdminService::new(
        authorization_service.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    let user_service = UserService::new(
        store.clone(),
        Arc::new(PrefixHasher),
        authorization_service.clone(),
        SessionTokenService::new(store.clone(), 60),
        store.clone(),
    );

    (
        AppState {
            authorization_service,
            security_admin_service,
            user_service,
        },
        store,
    )
}

pub async fn bootstrap_admin(state: &AppState) -> User {
    state
        .user_service
        .bootstrap_super_admin(BootstrapAdminInput {
            email: ADMIN_EMAIL.to_owned(),
            password: ADMIN_PASSWORD.to_owned(),
            display_name: "Bob".to_owned(),
        })
        .await
        .ok()
        .flatten()
        .map(|account| account.user)
        .unwrap_or_else(|| panic!("bootstrap should create the admin"))
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|error| panic!("body should be readable: {error}"));
    serde_json::from_slice(&bytes).unwrap_or_else(|error| panic!("body should be json: {error}"))
}

pub fn role_name(value: &str) -> RoleName {
    RoleName::new(value).unwrap_or_else(|error| panic!("role name: {error}"))
}

pub fn permission(value: &str) -> PermissionName {
    PermissionName::parse(value).unwrap_or_else(|error| panic!("permission: {error}"))
}
