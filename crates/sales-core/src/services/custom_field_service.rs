//! Custom field definitions

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::{AuditAction, CustomFieldDefinition, CustomFieldType};
use crate::error::DomainError;
use crate::repositories::CustomFieldRepository;

#[derive(Debug, Clone)]
pub struct CustomFieldInput {
    pub name: String,
    pub field_type: CustomFieldType,
    pub is_required: bool,
    pub options: Vec<String>,
    pub sort_order: i32,
}

pub struct CustomFieldService {
    fields: Arc<dyn CustomFieldRepository>,
    audit: AuditService,
}

impl CustomFieldService {
    pub fn new(fields: Arc<dyn CustomFieldRepository>, audit: AuditService) -> Self {
        Self { fields, audit }
    }

    pub async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<CustomFieldDefinition>, DomainError> {
        self.fields.list(tenant_id, include_inactive).await
    }

    pub async fn create(&self, scope: TenantScope, input: CustomFieldInput) -> Result<CustomFieldDefinition, DomainError> {
        let field = CustomFieldDefinition::new(
            scope.tenant_id,
            input.name,
            input.field_type,
            input.is_required,
            input.options,
            input.sort_order,
        )?;
        self.ensure_unique_name(scope.tenant_id, &field.name, None).await?;

        let field = self.fields.create(&field).await?;
        info!("Custom field {} ({}) created", field.name, field.field_type.as_str());
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::CustomFieldCreate,
                Some(field.id),
                serde_json::json!({ "name": field.name, "field_type": field.field_type.as_str() }),
            )
            .await;
        Ok(field)
    }

    pub async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        input: CustomFieldInput,
    ) -> Result<CustomFieldDefinition, DomainError> {
        let mut field = self
            .fields
            .find_by_id(scope.tenant_id, id)
            .await?
            .filter(|f| f.is_active)
            .ok_or_else(|| DomainError::not_found("Custom field"))?;

        field.apply(input.name, input.field_type, input.is_required, input.options, input.sort_order)?;
        self.ensure_unique_name(scope.tenant_id, &field.name, Some(id)).await?;

        let field = self.fields.update(&field).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::CustomFieldUpdate,
                Some(id),
                serde_json::json!({ "name": field.name }),
            )
            .await;
        Ok(field)
    }

    /// Logical delete: the definition stays resolvable for old records.
    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        let field = self
            .fields
            .find_by_id(scope.tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Custom field"))?;

        self.fields.deactivate(scope.tenant_id, id).await?;
        info!("Custom field {} deactivated", field.name);
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::CustomFieldDelete,
                Some(id),
                serde_json::json!({ "name": field.name }),
            )
            .await;
        Ok(())
    }

    async fn ensure_unique_name(&self, tenant_id: Uuid, name: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        let active = self.fields.list(tenant_id, false).await?;
        let taken = active
            .iter()
            .any(|f| Some(f.id) != except && f.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(DomainError::Conflict(format!("Custom field '{}' already exists", name)));
        }
        Ok(())
    }
}
