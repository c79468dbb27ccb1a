use stockroom_application::{CreateRoleInput, UpdateRoleInput};

use super::*;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .security_admin_service
        .list_permissions(&user)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .security_admin_service
        .list_roles(&user)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(role_name): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role_name = RoleName::new(role_name)?;
    let role = state
        .security_admin_service
        .find_role(&user, &role_name)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let permissions = payload
        .permissions
        .iter()
        .map(|value| PermissionName::parse(value))
        .collect::<Result<Vec<_>, _>>()?;

    let role = state
        .security_admin_service
        .create_role(
            &user,
            CreateRoleInput {
                name: RoleName::new(payload.name)?,
                display_name: payload.display_name,
                description: payload.description,
                permissions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(role_name): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role_name = RoleName::new(role_name)?;
    let role = state
        .security_admin_service
        .update_role(
            &user,
            &role_name,
            UpdateRoleInput {
                display_name: payload.display_name,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(role_name): Path<String>,
) -> ApiResult<StatusCode> {
    let role_name = RoleName::new(role_name)?;
    state
        .security_admin_service
        .delete_role(&user, &role_name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
