use axum::Json;
use axum::extract::{Extension, Query, State};
use stockroom_domain::{PermissionName, User};

use crate::dto::{AccessCheckQuery, AccessCheckResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/access/check - Decide one permission for the current user.
///
/// Denials are part of the response body, not error statuses.
pub async fn access_check_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<AccessCheckQuery>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let permission = PermissionName::parse(&query.permission)?;
    let decision = state
        .authorization_service
        .authorize(&user, &permission)
        .await?;

    Ok(Json(AccessCheckResponse::new(&permission, decision)))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Query, State};
    use stockroom_application::{CreateRoleInput, ProvisionUserInput};
    use stockroom_core::AppError;

    use super::access_check_handler;
    use crate::dto::AccessCheckQuery;
    use crate::test_support::{bootstrap_admin, in_memory_state, permission, role_name};

    fn query(permission: &str) -> Query<AccessCheckQuery> {
        Query(AccessCheckQuery {
            permission: permission.to_owned(),
        })
    }

    #[tokio::test]
    async fn super_admin_is_allowed_undefined_permissions() {
        let (state, _store) = in_memory_state();
        let bob = bootstrap_admin(&state).await;

        let response = access_check_handler(
            State(state),
            Extension(bob),
            query("anything.not_defined"),
        )
        .await
        .unwrap_or_else(|_| panic!("check should succeed"));

        assert!(response.allowed);
        assert_eq!(response.permission, "anything.not_defined");
        assert_eq!(response.reason, None);
    }

    #[tokio::test]
    async fn missing_permission_is_a_deny_value() {
        let (state, _store) = in_memory_state();
        let bob = bootstrap_admin(&state).await;
        assert!(
            state
                .security_admin_service
                .create_role(
                    &bob,
                    CreateRoleInput {
                        name: role_name("clerk"),
                        display_name: "Clerk".to_owned(),
                        description: None,
                        permissions: vec![permission("inventory.view")],
                    },
                )
                .await
                .is_ok()
        );
        let clerk = state
            .user_service
            .provision_user(
                &bob,
                ProvisionUserInput {
                    email: "clerk@example.com".to_owned(),
                    display_name: "Clerk".to_owned(),
                    password: "clerk-password-42".to_owned(),
                    role_name: role_name("clerk"),
                },
            )
            .await
            .unwrap_or_else(|_| panic!("clerk should be provisioned"))
            .user;

        let denied = access_check_handler(
            State(state.clone()),
            Extension(clerk.clone()),
            query("INVENTORY_BULK_UPLOAD"),
        )
        .await
        .unwrap_or_else(|_| panic!("check should succeed"));

        assert_eq!(denied.permission, "inventory.bulk_upload");
        assert!(!denied.allowed);
        assert_eq!(denied.reason.as_deref(), Some("permission_missing"));

        let allowed = access_check_handler(State(state), Extension(clerk), query("inventory.view"))
            .await
            .unwrap_or_else(|_| panic!("check should succeed"));
        assert!(allowed.allowed);
    }

    #[tokio::test]
    async fn malformed_permission_is_rejected() {
        let (state, _store) = in_memory_state();
        let bob = bootstrap_admin(&state).await;

        let result = access_check_handler(State(state), Extension(bob), query("nodots")).await;

        assert!(matches!(result, Err(error) if matches!(error.0, AppError::Validation(_))));
    }
}
