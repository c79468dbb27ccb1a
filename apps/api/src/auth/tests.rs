use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use stockroom_application::ProvisionUserInput;
use stockroom_core::AppError;

use super::{change_password_handler, login_handler, logout_handler, me_handler};
use crate::dto::{AuthLoginRequest, ChangePasswordRequest};
use crate::middleware::BearerToken;
use crate::state::AppState;
use crate::test_support::{
    ADMIN_EMAIL, ADMIN_PASSWORD, bootstrap_admin, in_memory_state, role_name,
};

fn credentials(email: &str, password: &str) -> Json<AuthLoginRequest> {
    Json(AuthLoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

async fn login(state: &AppState, email: &str, password: &str) -> String {
    let Json(response) = login_handler(State(state.clone()), credentials(email, password))
        .await
        .unwrap_or_else(|_| panic!("login should succeed"));
    assert_eq!(response.token_type, "Bearer");
    response.token
}

#[tokio::test]
async fn login_me_and_logout_round_trip() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;

    let token = login(&state, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let user = state
        .user_service
        .authenticate_token(&token)
        .await
        .unwrap_or_else(|_| panic!("token should resolve"));
    assert_eq!(user.id(), bob.id());

    let Json(me) = me_handler(State(state.clone()), Extension(user.clone()))
        .await
        .unwrap_or_else(|_| panic!("me should load"));
    assert_eq!(me.email, ADMIN_EMAIL);
    assert_eq!(me.role_name, "super_admin");
    assert!(me.is_super_admin);
    assert!(me.role_is_active);

    let logout = logout_handler(
        State(state.clone()),
        Extension(user),
        Extension(BearerToken(token.clone())),
    )
    .await;
    assert_eq!(logout.ok(), Some(StatusCode::NO_CONTENT));

    let after_logout = state.user_service.authenticate_token(&token).await;
    assert!(matches!(after_logout, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let (state, _store) = in_memory_state();
    bootstrap_admin(&state).await;

    let wrong_password =
        login_handler(State(state.clone()), credentials(ADMIN_EMAIL, "not-the-password")).await;
    let unknown_email = login_handler(
        State(state),
        credentials("nobody@example.com", ADMIN_PASSWORD),
    )
    .await;

    assert!(matches!(wrong_password, Err(error) if matches!(error.0, AppError::Unauthorized(_))));
    assert!(matches!(unknown_email, Err(error) if matches!(error.0, AppError::Unauthorized(_))));
}

#[tokio::test]
async fn deactivated_account_cannot_log_in() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;
    let alice = state
        .user_service
        .provision_user(
            &bob,
            ProvisionUserInput {
                email: "alice@example.com".to_owned(),
                display_name: "Alice".to_owned(),
                password: "alice-password-42".to_owned(),
                role_name: role_name("super_admin"),
            },
        )
        .await
        .unwrap_or_else(|_| panic!("alice should be provisioned"))
        .user;
    let alice_token = login(&state, "alice@example.com", "alice-password-42").await;

    assert!(
        state
            .user_service
            .set_user_active(&bob, alice.id(), false)
            .await
            .is_ok()
    );

    let revoked = state.user_service.authenticate_token(&alice_token).await;
    assert!(matches!(revoked, Err(AppError::Unauthorized(_))));

    let result = login_handler(
        State(state),
        credentials("alice@example.com", "alice-password-42"),
    )
    .await;
    assert!(matches!(result, Err(error) if matches!(error.0, AppError::AccountInactive(_))));
}

#[tokio::test]
async fn password_change_revokes_existing_tokens() {
    let (state, _store) = in_memory_state();
    let bob = bootstrap_admin(&state).await;
    let token = login(&state, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let changed = change_password_handler(
        State(state.clone()),
        Extension(bob),
        Json(ChangePasswordRequest {
            current_password: ADMIN_PASSWORD.to_owned(),
            new_password: "fresh-password-77".to_owned(),
        }),
    )
    .await;
    assert_eq!(changed.ok(), Some(StatusCode::NO_CONTENT));

    let stale = state.user_service.authenticate_token(&token).await;
    assert!(matches!(stale, Err(AppError::Unauthorized(_))));

    login(&state, ADMIN_EMAIL, "fresh-password-77").await;
}
