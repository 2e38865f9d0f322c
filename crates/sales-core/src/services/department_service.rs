//! Departments

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::{AuditAction, Department};
use crate::error::DomainError;
use crate::repositories::DepartmentRepository;

pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepository>,
    audit: AuditService,
}

impl DepartmentService {
    pub fn new(departments: Arc<dyn DepartmentRepository>, audit: AuditService) -> Self {
        Self { departments, audit }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Department>, DomainError> {
        self.departments.list(tenant_id).await
    }

    pub async fn create(&self, scope: TenantScope, name: String) -> Result<Department, DomainError> {
        let department = Department::new(scope.tenant_id, name)?;
        let department = self.departments.create(&department).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::DepartmentCreate,
                Some(department.id),
                serde_json::json!({ "name": department.name }),
            )
            .await;
        Ok(department)
    }

    pub async fn update(&self, scope: TenantScope, id: Uuid, name: String) -> Result<Department, DomainError> {
        let mut department = self
            .departments
            .find_by_id(scope.tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Department"))?;
        department.name = name.trim().to_string();
        department.updated_at = chrono::Utc::now();
        department.validate()?;

        let department = self.departments.update(&department).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::DepartmentUpdate,
                Some(id),
                serde_json::json!({ "name": department.name }),
            )
            .await;
        Ok(department)
    }

    /// Members of the department keep existing with no department.
    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        self.departments.delete(scope.tenant_id, id).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::DepartmentDelete,
                Some(id),
                serde_json::json!({}),
            )
            .await;
        Ok(())
    }
}
