//! Custom slide repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::CustomSlide;
use crate::error::DomainError;

#[async_trait]
pub trait CustomSlideRepository: Send + Sync {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<CustomSlide>, DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<CustomSlide>, DomainError>;
    async fn create(&self, slide: &CustomSlide) -> Result<CustomSlide, DomainError>;
    async fn update(&self, slide: &CustomSlide) -> Result<CustomSlide, DomainError>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;
}
