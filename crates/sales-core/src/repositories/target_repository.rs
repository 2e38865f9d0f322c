//! Target repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Target, YearMonth};
use crate::error::DomainError;

#[async_trait]
pub trait TargetRepository: Send + Sync {
    async fn list_for_month(&self, tenant_id: Uuid, month: YearMonth) -> Result<Vec<Target>, DomainError>;
    async fn list_for_year(&self, tenant_id: Uuid, year: i32) -> Result<Vec<Target>, DomainError>;
    /// Insert or overwrite on `(tenant, member, year, month)`.
    async fn upsert(&self, targets: &[Target]) -> Result<(), DomainError>;
}
