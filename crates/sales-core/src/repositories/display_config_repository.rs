//! Display config repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::DisplayConfig;
use crate::error::DomainError;

#[async_trait]
pub trait DisplayConfigRepository: Send + Sync {
    async fn find(&self, tenant_id: Uuid) -> Result<Option<DisplayConfig>, DomainError>;
    /// Replace the config row and all of its views in one transaction.
    async fn replace(&self, config: &DisplayConfig) -> Result<DisplayConfig, DomainError>;
}
