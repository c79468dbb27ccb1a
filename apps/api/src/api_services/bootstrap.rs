use stockroom_application::BootstrapAdminInput;
use stockroom_core::AppError;
use tracing::info;

use crate::state::AppState;

/// Creates the configured super-admin account on an empty user table.
pub async fn bootstrap_super_admin(
    state: &AppState,
    input: BootstrapAdminInput,
) -> Result<(), AppError> {
    if let Some(account) = state.user_service.bootstrap_super_admin(input).await? {
        info!(
            user_id = %account.user.id(),
            role = %account.role_name,
            "bootstrapped super-admin account"
        );
    }

    Ok(())
}
