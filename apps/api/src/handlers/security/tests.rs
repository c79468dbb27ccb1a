use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use stockroom_application::ProvisionUserInput;
use stockroom_core::AppError;
use stockroom_domain::User;

use super::{
    create_role_handler, delete_role_handler, get_role_handler, grant_permission_handler,
    list_audit_log_handler, list_permissions_handler, list_roles_handler,
    revoke_permission_handler, update_role_handler,
};
use crate::dto::{AuditLogQueryParams, CreateRoleRequest, UpdateRoleRequest};
use crate::error::ApiError;
use crate::state::AppState;
use crate::test_support::{bootstrap_admin, in_memory_state, role_name};

fn create_request(name: &str, permissions: &[&str]) -> Json<CreateRoleRequest> {
    Json(CreateRoleRequest {
        name: name.to_owned(),
        display_name: "Manager".to_owned(),
        description: Some("  Runs the floor  ".to_owned()),
        permissions: permissions.iter().map(|value| (*value).to_owned()).collect(),
    })
}

fn grant_path(role: &str, permission: &str) -> Path<(String, String)> {
    Path((role.to_owned(), permission.to_owned()))
}

async fn provision(state: &AppState, admin: &User, email: &str, role: &str) -> User {
    state
        .user_service
        .provision_user(
            admin,
            ProvisionUserInput {
                email: email.to_owned(),
                display_name: "Staff".to_owned(),
                password: "staff-password-42".to_owned(),
                role_name: role_name(role),
            },
        )
        .await
        .unwrap_or_else(|_| panic!("user should be provisioned"))
        .user
}

fn error_of<T>(result: Result<T, ApiError>) -> AppError {
    match result {
        Ok(_) => panic!("expected an error"),
        Err(error) => error.0,
    }
}

#[tokio::test]
async fn role_lifecycle_through_handlers() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;

    let (status, Json(created)) = create_role_handler(
        State(state.clone()),
        Extension(bob.clone()),
        create_request("manager", &["ORDERS_VIEW", "inventory.view", "orders.view"]),
    )
    .await
    .unwrap_or_else(|_| panic!("role should be created"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.permissions, vec!["inventory.view", "orders.view"]);
    assert_eq!(created.description.as_deref(), Some("Runs the floor"));
    assert!(!created.is_super_admin);

    let granted = grant_permission_handler(
        State(state.clone()),
        Extension(bob.clone()),
        grant_path("manager", "reports.view"),
    )
    .await;
    assert_eq!(granted.ok(), Some(StatusCode::CREATED));

    let regranted = grant_permission_handler(
        State(state.clone()),
        Extension(bob.clone()),
        grant_path("manager", "REPORTS_VIEW"),
    )
    .await;
    assert_eq!(regranted.ok(), Some(StatusCode::NO_CONTENT));

    let revoked = revoke_permission_handler(
        State(state.clone()),
        Extension(bob.clone()),
        grant_path("manager", "orders.view"),
    )
    .await;
    assert_eq!(revoked.ok(), Some(StatusCode::NO_CONTENT));

    let Json(role) = get_role_handler(
        State(state.clone()),
        Extension(bob.clone()),
        Path("manager".to_owned()),
    )
    .await
    .unwrap_or_else(|_| panic!("role should be found"));
    assert_eq!(role.permissions, vec!["inventory.view", "reports.view"]);

    let Json(updated) = update_role_handler(
        State(state.clone()),
        Extension(bob.clone()),
        Path("manager".to_owned()),
        Json(UpdateRoleRequest {
            display_name: "Floor Manager".to_owned(),
            description: None,
            is_active: false,
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("role should be updated"));
    assert_eq!(updated.display_name, "Floor Manager");
    assert!(!updated.is_active);

    let deleted = delete_role_handler(
        State(state.clone()),
        Extension(bob.clone()),
        Path("manager".to_owned()),
    )
    .await;
    assert_eq!(deleted.ok(), Some(StatusCode::NO_CONTENT));

    let missing = get_role_handler(State(state), Extension(bob), Path("manager".to_owned())).await;
    assert!(matches!(error_of(missing), AppError::NotFound(_)));
}

#[tokio::test]
async fn revoking_an_absent_grant_is_not_found() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;
    assert!(
        create_role_handler(
            State(state.clone()),
            Extension(bob.clone()),
            create_request("manager", &["inventory.view"]),
        )
        .await
        .is_ok()
    );

    let result = revoke_permission_handler(
        State(state),
        Extension(bob),
        grant_path("manager", "orders.view"),
    )
    .await;

    assert!(matches!(error_of(result), AppError::NotFound(_)));
}

#[tokio::test]
async fn super_admin_role_rejects_grants_and_deletion() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;

    let grant = grant_permission_handler(
        State(state.clone()),
        Extension(bob.clone()),
        grant_path("super_admin", "inventory.view"),
    )
    .await;
    assert!(matches!(error_of(grant), AppError::Validation(_)));

    let delete = delete_role_handler(
        State(state),
        Extension(bob),
        Path("super_admin".to_owned()),
    )
    .await;
    assert!(matches!(error_of(delete), AppError::Conflict(_)));
}

#[tokio::test]
async fn staff_without_role_permissions_is_forbidden() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;
    assert!(
        create_role_handler(
            State(state.clone()),
            Extension(bob.clone()),
            create_request("clerk", &["inventory.view"]),
        )
        .await
        .is_ok()
    );
    let clerk = provision(&state, &bob, "clerk@example.com", "clerk").await;

    let roles = list_roles_handler(State(state.clone()), Extension(clerk.clone())).await;
    assert!(matches!(error_of(roles), AppError::Forbidden(_)));

    let create = create_role_handler(
        State(state.clone()),
        Extension(clerk.clone()),
        create_request("shadow", &["roles.manage"]),
    )
    .await;
    assert!(matches!(error_of(create), AppError::Forbidden(_)));

    let audit = list_audit_log_handler(
        State(state),
        Extension(clerk),
        Query(AuditLogQueryParams::default()),
    )
    .await;
    assert!(matches!(error_of(audit), AppError::Forbidden(_)));
}

#[tokio::test]
async fn permission_catalog_lists_every_entry() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;

    let Json(permissions) = list_permissions_handler(State(state.clone()), Extension(bob.clone()))
        .await
        .unwrap_or_else(|_| panic!("catalog should load"));
    assert_eq!(
        permissions.len(),
        stockroom_domain::CatalogPermission::all().len()
    );
    assert!(
        permissions
            .iter()
            .any(|permission| permission.name == "inventory.bulk_upload")
    );

    let Json(roles) = list_roles_handler(State(state), Extension(bob))
        .await
        .unwrap_or_else(|_| panic!("roles should load"));
    let super_admin = roles
        .iter()
        .find(|role| role.name == "super_admin")
        .unwrap_or_else(|| panic!("super admin role should be seeded"));
    assert!(super_admin.is_super_admin);
    assert_eq!(super_admin.user_count, 1);
}

#[tokio::test]
async fn audit_log_filters_by_action() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;
    assert!(
        create_role_handler(
            State(state.clone()),
            Extension(bob.clone()),
            create_request("manager", &["inventory.view"]),
        )
        .await
        .is_ok()
    );

    let Json(entries) = list_audit_log_handler(
        State(state.clone()),
        Extension(bob.clone()),
        Query(AuditLogQueryParams {
            action: Some("security.role.created".to_owned()),
            ..AuditLogQueryParams::default()
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("audit log should load"));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].resource_id, "manager");
    assert_eq!(entries[0].subject, bob.id().to_string());

    let unknown = list_audit_log_handler(
        State(state),
        Extension(bob),
        Query(AuditLogQueryParams {
            action: Some("security.role.exploded".to_owned()),
            ..AuditLogQueryParams::default()
        }),
    )
    .await;
    assert!(matches!(error_of(unknown), AppError::Validation(_)));
}
