//! Audit log repository trait (port)

use async_trait::async_trait;
use sales_shared::types::{Page, Pagination};
use uuid::Uuid;

use crate::domain::AuditLog;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLog) -> Result<(), DomainError>;
    /// Latest first.
    async fn list(&self, tenant_id: Uuid, pagination: Pagination) -> Result<Page<AuditLog>, DomainError>;
}
