//! Custom field definition repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::CustomFieldDefinition;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomFieldRepository: Send + Sync {
    /// Ordered by `sort_order`, then name.
    async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<CustomFieldDefinition>, DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<CustomFieldDefinition>, DomainError>;
    async fn create(&self, field: &CustomFieldDefinition) -> Result<CustomFieldDefinition, DomainError>;
    async fn update(&self, field: &CustomFieldDefinition) -> Result<CustomFieldDefinition, DomainError>;
    async fn deactivate(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;
}
