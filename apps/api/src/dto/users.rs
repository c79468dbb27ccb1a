use serde::{Deserialize, Serialize};
use stockroom_application::UserAccount;
use ts_rs::TS;

/// API representation of a user account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub role_name: String,
    pub is_active: bool,
}

impl From<UserAccount> for UserResponse {
    fn from(value: UserAccount) -> Self {
        Self {
            user_id: value.user.id().to_string(),
            email: value.user.email().as_str().to_owned(),
            display_name: value.user.display_name().as_str().to_owned(),
            role_name: value.role_name.as_str().to_owned(),
            is_active: value.user.is_active(),
        }
    }
}

/// Incoming payload for user provisioning.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub role_name: String,
}

/// Incoming payload for role assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-user-role-request.ts"
)]
pub struct AssignUserRoleRequest {
    pub role_name: String,
}

/// Incoming payload for account activation changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-user-active-request.ts"
)]
pub struct SetUserActiveRequest {
    pub is_active: bool,
}
