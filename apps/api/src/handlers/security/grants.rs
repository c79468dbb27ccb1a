use super::*;

/// PUT /api/security/roles/{role_name}/grants/{permission}
///
/// Responds `201 Created` when the grant was added and `204 No Content` when
/// the role already held it.
pub async fn grant_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((role_name, permission)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let role_name = RoleName::new(role_name)?;
    let permission = PermissionName::parse(&permission)?;

    let inserted = state
        .security_admin_service
        .grant_permission(&user, &role_name, &permission)
        .await?;

    Ok(if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::NO_CONTENT
    })
}

pub async fn revoke_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((role_name, permission)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let role_name = RoleName::new(role_name)?;
    let permission = PermissionName::parse(&permission)?;

    state
        .security_admin_service
        .revoke_permission(&user, &role_name, &permission)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
