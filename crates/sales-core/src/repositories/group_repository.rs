//! Group repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Member};
use crate::error::DomainError;

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Group>, DomainError>;
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Group>, DomainError>;
    async fn create(&self, group: &Group) -> Result<Group, DomainError>;
    async fn update(&self, group: &Group) -> Result<Group, DomainError>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError>;

    /// Member ids of one group.
    async fn member_ids(&self, tenant_id: Uuid, group_id: Uuid) -> Result<Vec<Uuid>, DomainError>;
    /// Members of one group, ordered like the member list.
    async fn members(&self, tenant_id: Uuid, group_id: Uuid) -> Result<Vec<Member>, DomainError>;
    /// All `(group_id, member_id)` pairs of the tenant.
    async fn memberships(&self, tenant_id: Uuid) -> Result<Vec<(Uuid, Uuid)>, DomainError>;
    /// Delete every membership of the group and insert `member_ids`, atomically.
    async fn replace_members(
        &self,
        tenant_id: Uuid,
        group_id: Uuid,
        member_ids: &[Uuid],
    ) -> Result<(), DomainError>;
}
