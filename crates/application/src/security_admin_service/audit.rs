use super::*;

use crate::{AUDIT_LOG_MAX_LIMIT, AuditLogEntry, AuditLogQuery};

impl SecurityAdminService {
    /// Returns recent audit entries, newest first.
    pub async fn list_audit_log(
        &self,
        actor: &User,
        mut query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>> {
        self.require(actor, CatalogPermission::AuditView).await?;

        query.limit = query.limit.clamp(1, AUDIT_LOG_MAX_LIMIT);
        self.audit_log_repository.list_recent_entries(query).await
    }
}
