//! Members (salespeople)

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::member::normalize_optional;
use crate::domain::{AuditAction, Member};
use crate::error::DomainError;
use crate::repositories::{DepartmentRepository, MemberRepository};

#[derive(Debug, Clone)]
pub struct MemberInput {
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
}

pub struct MemberService {
    members: Arc<dyn MemberRepository>,
    departments: Arc<dyn DepartmentRepository>,
    audit: AuditService,
}

impl MemberService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        departments: Arc<dyn DepartmentRepository>,
        audit: AuditService,
    ) -> Self {
        Self {
            members,
            departments,
            audit,
        }
    }

    pub async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<Member>, DomainError> {
        self.members.list(tenant_id, include_inactive).await
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Member, DomainError> {
        self.members
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Member"))
    }

    pub async fn create(&self, scope: TenantScope, input: MemberInput) -> Result<Member, DomainError> {
        self.check_department(scope.tenant_id, input.department_id).await?;

        let mut member = Member::new(
            scope.tenant_id,
            input.name,
            input.email,
            input.department_id,
            input.image_url,
            input.display_order,
        )?;
        member.is_active = input.is_active;

        let member = self.members.create(&member).await?;
        info!("Member {} created in tenant {}", member.id, scope.tenant_id);
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::MemberCreate,
                Some(member.id),
                serde_json::json!({ "name": member.name }),
            )
            .await;
        Ok(member)
    }

    pub async fn update(&self, scope: TenantScope, id: Uuid, input: MemberInput) -> Result<Member, DomainError> {
        let mut member = self.get(scope.tenant_id, id).await?;
        self.check_department(scope.tenant_id, input.department_id).await?;

        member.name = input.name.trim().to_string();
        member.email = normalize_optional(input.email);
        member.department_id = input.department_id;
        member.image_url = normalize_optional(input.image_url);
        member.display_order = input.display_order;
        member.is_active = input.is_active;
        member.updated_at = chrono::Utc::now();
        member.validate()?;

        let member = self.members.update(&member).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::MemberUpdate,
                Some(id),
                serde_json::json!({ "name": member.name, "is_active": member.is_active }),
            )
            .await;
        Ok(member)
    }

    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        let member = self.get(scope.tenant_id, id).await?;
        self.members.delete(scope.tenant_id, id).await?;
        info!("Member {} deleted from tenant {}", id, scope.tenant_id);
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::MemberDelete,
                Some(id),
                serde_json::json!({ "name": member.name }),
            )
            .await;
        Ok(())
    }

    async fn check_department(&self, tenant_id: Uuid, department_id: Option<Uuid>) -> Result<(), DomainError> {
        if let Some(department_id) = department_id {
            if self.departments.find_by_id(tenant_id, department_id).await?.is_none() {
                return Err(DomainError::validation("Department does not belong to this tenant"));
            }
        }
        Ok(())
    }
}
