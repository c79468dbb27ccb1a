use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use stockroom_application::{
    AUDIT_LOG_MAX_LIMIT, AuditEvent, AuditLogQuery, AuditLogRepository, AuditRepository,
};

use super::*;

#[async_trait]
impl AuditRepository for InMemoryAccessStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.audit_entries.write().await.push(AuditLogEntry {
            event_id: uuid::Uuid::new_v4().to_string(),
            subject: event.subject,
            action: event.action.as_str().to_owned(),
            resource_type: event.resource_type,
            resource_id: event.resource_id,
            detail: event.detail,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        });
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAccessStore {
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.audit_entries.read().await;

        Ok(entries
            .iter()
            .rev()
            .filter(|entry| {
                query
                    .action
                    .is_none_or(|action| entry.action == action.as_str())
            })
            .filter(|entry| {
                query
                    .subject
                    .as_deref()
                    .is_none_or(|subject| entry.subject == subject)
            })
            .skip(query.offset)
            .take(query.limit.clamp(1, AUDIT_LOG_MAX_LIMIT))
            .cloned()
            .collect())
    }
}
