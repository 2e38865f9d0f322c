//! Integration repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Integration;
use crate::error::DomainError;

#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Integration>, DomainError>;
    /// Insert or overwrite on `(tenant, provider)`.
    async fn upsert(&self, integration: &Integration) -> Result<Integration, DomainError>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;
    async fn list_active(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError>;
}
