//! Groups and group membership

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::member::normalize_optional;
use crate::domain::{AuditAction, Group, GroupWithMembers, Member};
use crate::error::DomainError;
use crate::repositories::{GroupRepository, MemberRepository};

#[derive(Debug, Clone)]
pub struct GroupInput {
    pub name: String,
    pub description: Option<String>,
}

pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    members: Arc<dyn MemberRepository>,
    audit: AuditService,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>, members: Arc<dyn MemberRepository>, audit: AuditService) -> Self {
        Self { groups, members, audit }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<GroupWithMembers>, DomainError> {
        let groups = self.groups.list(tenant_id).await?;
        let memberships = self.groups.memberships(tenant_id).await?;

        Ok(groups
            .into_iter()
            .map(|group| {
                let member_ids = memberships
                    .iter()
                    .filter(|(group_id, _)| *group_id == group.id)
                    .map(|(_, member_id)| *member_id)
                    .collect();
                GroupWithMembers { group, member_ids }
            })
            .collect())
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Group, DomainError> {
        self.groups
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Group"))
    }

    pub async fn create(&self, scope: TenantScope, input: GroupInput) -> Result<Group, DomainError> {
        let group = Group::new(scope.tenant_id, input.name, input.description)?;
        let group = self.groups.create(&group).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::GroupCreate,
                Some(group.id),
                serde_json::json!({ "name": group.name }),
            )
            .await;
        Ok(group)
    }

    pub async fn update(&self, scope: TenantScope, id: Uuid, input: GroupInput) -> Result<Group, DomainError> {
        let mut group = self.get(scope.tenant_id, id).await?;
        group.name = input.name.trim().to_string();
        group.description = normalize_optional(input.description);
        group.updated_at = chrono::Utc::now();
        group.validate()?;

        let group = self.groups.update(&group).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::GroupUpdate,
                Some(id),
                serde_json::json!({ "name": group.name }),
            )
            .await;
        Ok(group)
    }

    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        self.get(scope.tenant_id, id).await?;
        self.groups.delete(scope.tenant_id, id).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::GroupDelete,
                Some(id),
                serde_json::json!({}),
            )
            .await;
        Ok(())
    }

    pub async fn members(&self, tenant_id: Uuid, id: Uuid) -> Result<Vec<Member>, DomainError> {
        self.get(tenant_id, id).await?;
        self.groups.members(tenant_id, id).await
    }

    /// Replace the group's membership with `member_ids` (duplicates
    /// dropped, first occurrence wins). Every id must be a member of the
    /// same tenant.
    pub async fn sync_members(
        &self,
        scope: TenantScope,
        id: Uuid,
        member_ids: Vec<Uuid>,
    ) -> Result<Vec<Uuid>, DomainError> {
        self.get(scope.tenant_id, id).await?;

        let mut seen = HashSet::new();
        let unique: Vec<Uuid> = member_ids.into_iter().filter(|m| seen.insert(*m)).collect();

        let found = self.members.find_by_ids(scope.tenant_id, &unique).await?;
        if found.len() != unique.len() {
            let known: HashSet<Uuid> = found.iter().map(|m| m.id).collect();
            let missing: Vec<String> = unique
                .iter()
                .filter(|m| !known.contains(m))
                .map(|m| m.to_string())
                .collect();
            return Err(DomainError::validation(format!(
                "Not members of this tenant: {}",
                missing.join(", ")
            )));
        }

        self.groups.replace_members(scope.tenant_id, id, &unique).await?;
        info!("Group {} now has {} members", id, unique.len());
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::GroupMembersSync,
                Some(id),
                serde_json::json!({ "member_count": unique.len() }),
            )
            .await;
        Ok(unique)
    }
}
