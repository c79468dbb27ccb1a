use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use stockroom_core::AppError;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Raw bearer token of the current request, kept for logout.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Resolves the bearer token to an active user and stores it as a request extension.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let user = state.user_service.authenticate_token(&token).await?;
    if !user.is_active() {
        debug!(user_id = %user.id(), "rejected bearer token of inactive user");
        return Err(AppError::AccountInactive(format!("user '{}' is deactivated", user.id())).into());
    }

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_owned())
}
