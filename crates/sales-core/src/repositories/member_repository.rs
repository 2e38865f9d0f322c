//! Member repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Member;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Ordered by `display_order`, then name.
    async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<Member>, DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Member>, DomainError>;
    async fn find_by_ids(&self, tenant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Member>, DomainError>;
    async fn create(&self, member: &Member) -> Result<Member, DomainError>;
    async fn update(&self, member: &Member) -> Result<Member, DomainError>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;
}
