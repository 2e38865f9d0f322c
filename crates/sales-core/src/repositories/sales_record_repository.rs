//! Sales record repository trait (port)

use async_trait::async_trait;
use sales_shared::types::{Page, Pagination};
use uuid::Uuid;

use crate::domain::{SalesFilter, SalesRecord, SalesRecordWithMember};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalesRecordRepository: Send + Sync {
    async fn create(&self, record: &SalesRecord) -> Result<SalesRecord, DomainError>;
    /// Insert all records in one transaction.
    async fn create_many(&self, records: &[SalesRecord]) -> Result<(), DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<SalesRecord>, DomainError>;
    async fn update(&self, record: &SalesRecord) -> Result<SalesRecord, DomainError>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;

    /// Newest first (`sale_date`, then `created_at`).
    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &SalesFilter,
        pagination: Pagination,
    ) -> Result<Page<SalesRecordWithMember>, DomainError>;

    /// Every matching record, newest first. Used by export and aggregation.
    async fn list_all(
        &self,
        tenant_id: Uuid,
        filter: &SalesFilter,
    ) -> Result<Vec<SalesRecordWithMember>, DomainError>;
}
