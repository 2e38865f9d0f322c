//! Audit trail recording and listing

use std::sync::Arc;

use sales_shared::types::{Page, Pagination};
use tracing::error;
use uuid::Uuid;

use crate::domain::{AuditAction, AuditLog};
use crate::error::DomainError;
use crate::repositories::AuditLogRepository;

#[derive(Clone)]
pub struct AuditService {
    logs: Arc<dyn AuditLogRepository>,
}

impl AuditService {
    pub fn new(logs: Arc<dyn AuditLogRepository>) -> Self {
        Self { logs }
    }

    /// Append an entry. Failures are logged; the audited operation has
    /// already happened and is not rolled back.
    pub async fn record(
        &self,
        tenant_id: Option<Uuid>,
        user_id: Option<Uuid>,
        action: AuditAction,
        entity_id: Option<Uuid>,
        details: serde_json::Value,
    ) {
        let entry = AuditLog::new(tenant_id, user_id, action, entity_id, details);
        if let Err(e) = self.logs.append(&entry).await {
            error!("Failed to write audit log {}: {}", action.as_str(), e);
        }
    }

    pub async fn list(&self, tenant_id: Uuid, pagination: Pagination) -> Result<Page<AuditLog>, DomainError> {
        self.logs.list(tenant_id, pagination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::audit_log_repository::MockAuditLogRepository;

    #[tokio::test]
    async fn test_record_swallows_repository_errors() {
        let mut repo = MockAuditLogRepository::new();
        repo.expect_append()
            .times(1)
            .returning(|_| Err(DomainError::DatabaseError("down".to_string())));

        let audit = AuditService::new(Arc::new(repo));
        audit
            .record(Some(Uuid::nil()), None, AuditAction::SalesCreate, None, serde_json::json!({}))
            .await;
    }

    #[tokio::test]
    async fn test_record_fills_entity_type() {
        let mut repo = MockAuditLogRepository::new();
        repo.expect_append()
            .withf(|entry| entry.action == "GROUP_MEMBERS_SYNC" && entry.entity_type == "group")
            .times(1)
            .returning(|_| Ok(()));

        let audit = AuditService::new(Arc::new(repo));
        audit
            .record(None, None, AuditAction::GroupMembersSync, Some(Uuid::new_v4()), serde_json::json!({}))
            .await;
    }
}
