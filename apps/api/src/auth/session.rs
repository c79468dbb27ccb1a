use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use stockroom_domain::User;

use crate::dto::CurrentUserResponse;
use crate::error::ApiResult;
use crate::middleware::BearerToken;
use crate::state::AppState;

pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<BearerToken>,
) -> ApiResult<StatusCode> {
    state.user_service.end_session(&user, &token.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let access = state.authorization_service.effective_access(&user).await?;
    Ok(Json(CurrentUserResponse::new(&user, access)))
}
