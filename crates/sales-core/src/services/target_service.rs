//! Monthly sales targets

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::{AuditAction, Target, YearMonth};
use crate::error::DomainError;
use crate::repositories::{MemberRepository, TargetRepository};

#[derive(Debug, Clone)]
pub struct TargetInput {
    pub member_id: Uuid,
    pub monthly: i64,
    pub quarterly: i64,
    pub annual: i64,
}

/// One row of the target editor: every active member, zeros when unset.
#[derive(Debug, Clone, Serialize)]
pub struct MemberTarget {
    pub member_id: Uuid,
    pub member_name: String,
    pub year: i32,
    pub month: u32,
    pub monthly: i64,
    pub quarterly: i64,
    pub annual: i64,
}

pub struct TargetService {
    targets: Arc<dyn TargetRepository>,
    members: Arc<dyn MemberRepository>,
    audit: AuditService,
}

impl TargetService {
    pub fn new(targets: Arc<dyn TargetRepository>, members: Arc<dyn MemberRepository>, audit: AuditService) -> Self {
        Self { targets, members, audit }
    }

    pub async fn list(&self, tenant_id: Uuid, month: YearMonth) -> Result<Vec<MemberTarget>, DomainError> {
        let members = self.members.list(tenant_id, false).await?;
        let targets = self.targets.list_for_month(tenant_id, month).await?;

        Ok(members
            .into_iter()
            .map(|member| {
                let target = targets.iter().find(|t| t.member_id == member.id);
                MemberTarget {
                    member_id: member.id,
                    member_name: member.name,
                    year: month.year,
                    month: month.month,
                    monthly: target.map(|t| t.monthly).unwrap_or(0),
                    quarterly: target.map(|t| t.quarterly).unwrap_or(0),
                    annual: target.map(|t| t.annual).unwrap_or(0),
                }
            })
            .collect())
    }

    pub async fn upsert(
        &self,
        scope: TenantScope,
        month: YearMonth,
        items: Vec<TargetInput>,
    ) -> Result<Vec<Target>, DomainError> {
        let ids: Vec<Uuid> = items.iter().map(|i| i.member_id).collect();
        let unique: HashSet<Uuid> = ids.iter().copied().collect();
        if unique.len() != ids.len() {
            return Err(DomainError::validation("Each member may appear only once"));
        }
        let found = self.members.find_by_ids(scope.tenant_id, &ids).await?;
        if found.len() != unique.len() {
            return Err(DomainError::validation("Targets reference members outside this tenant"));
        }

        let targets = items
            .into_iter()
            .map(|i| Target::new(scope.tenant_id, i.member_id, month, i.monthly, i.quarterly, i.annual))
            .collect::<Result<Vec<_>, _>>()?;

        self.targets.upsert(&targets).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::TargetUpsert,
                None,
                serde_json::json!({ "month": month.to_string(), "count": targets.len() }),
            )
            .await;
        Ok(targets)
    }
}
