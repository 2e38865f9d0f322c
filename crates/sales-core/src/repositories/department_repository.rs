//! Department repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Department;
use crate::error::DomainError;

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Department>, DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Department>, DomainError>;
    async fn create(&self, department: &Department) -> Result<Department, DomainError>;
    async fn update(&self, department: &Department) -> Result<Department, DomainError>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;
}
