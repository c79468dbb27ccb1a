use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use stockroom_domain::User;

use crate::dto::ChangePasswordRequest;
use crate::error::ApiResult;
use crate::state::AppState;

/// PUT /api/profile/password - Change the current user's password.
///
/// Every bearer token of the user is revoked, including the one used here.
pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .change_password(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
