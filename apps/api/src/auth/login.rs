use axum::Json;
use axum::extract::State;
use stockroom_application::AuthOutcome;
use stockroom_core::AppError;

use crate::dto::{AuthLoginRequest, AuthLoginResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /auth/login - Exchange email and password for a bearer token.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<AuthLoginRequest>,
) -> ApiResult<Json<AuthLoginResponse>> {
    match state
        .user_service
        .login(&payload.email, &payload.password)
        .await?
    {
        AuthOutcome::Authenticated(user) => {
            let issued = state.user_service.start_session(&user).await?;
            Ok(Json(AuthLoginResponse::new(&user, issued)))
        }
        AuthOutcome::Inactive => {
            Err(AppError::AccountInactive("account is deactivated".to_owned()).into())
        }
        AuthOutcome::Failed => {
            Err(AppError::Unauthorized("invalid email or password".to_owned()).into())
        }
    }
}
