use std::str::FromStr;

use stockroom_application::AuditLogQuery;
use stockroom_domain::AuditAction;

use super::*;

const DEFAULT_AUDIT_LOG_LIMIT: usize = 50;

pub async fn list_audit_log_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<AuditLogQueryParams>,
) -> ApiResult<Json<Vec<AuditLogEntryResponse>>> {
    let action = query
        .action
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(AuditAction::from_str)
        .transpose()?;

    let entries = state
        .security_admin_service
        .list_audit_log(
            &user,
            AuditLogQuery {
                limit: query.limit.unwrap_or(DEFAULT_AUDIT_LOG_LIMIT),
                offset: query.offset.unwrap_or(0),
                action,
                subject: query.subject.filter(|value| !value.trim().is_empty()),
            },
        )
        .await?
        .into_iter()
        .map(AuditLogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
