use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use stockroom_application::ProvisionUserInput;
use stockroom_domain::{RoleName, User, UserId};

use crate::dto::{AssignUserRoleRequest, CreateUserRequest, SetUserActiveRequest, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&user)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let account = state
        .user_service
        .provision_user(
            &user,
            ProvisionUserInput {
                email: payload.email,
                display_name: payload.display_name,
                password: payload.password,
                role_name: RoleName::new(payload.role_name)?,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(account))))
}

pub async fn assign_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignUserRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;
    let role_name = RoleName::new(payload.role_name)?;

    let account = state
        .user_service
        .assign_role(&user, user_id, &role_name)
        .await?;

    Ok(Json(UserResponse::from(account)))
}

pub async fn set_user_active_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(user_id): Path<String>,
    Json(payload): Json<SetUserActiveRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;

    let account = state
        .user_service
        .set_user_active(&user, user_id, payload.is_active)
        .await?;

    Ok(Json(UserResponse::from(account)))
}
