use serde::{Deserialize, Serialize};
use stockroom_application::{EffectiveAccess, IssuedSessionToken};
use stockroom_domain::User;
use ts_rs::TS;

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-request.ts"
)]
pub struct AuthLoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued by a successful login.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-response.ts"
)]
pub struct AuthLoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: String,
    pub user_id: String,
}

impl AuthLoginResponse {
    pub fn new(user: &User, issued: IssuedSessionToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer",
            expires_at: issued.expires_at.to_rfc3339(),
            user_id: user.id().to_string(),
        }
    }
}

/// Incoming payload for password changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/change-password-request.ts"
)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// The authenticated user with the permissions the role currently confers.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/current-user-response.ts"
)]
pub struct CurrentUserResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub role_name: String,
    pub role_is_active: bool,
    pub is_super_admin: bool,
    pub permissions: Vec<String>,
}

impl CurrentUserResponse {
    pub fn new(user: &User, access: EffectiveAccess) -> Self {
        Self {
            user_id: user.id().to_string(),
            email: user.email().as_str().to_owned(),
            display_name: user.display_name().as_str().to_owned(),
            role_name: access.role.name().as_str().to_owned(),
            role_is_active: access.role.is_active(),
            is_super_admin: access.role.is_super_admin(),
            permissions: access
                .permissions
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
