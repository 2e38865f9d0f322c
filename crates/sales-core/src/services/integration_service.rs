//! Messaging integrations and sale notifications

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::integration::IntegrationSettings;
use crate::domain::{AuditAction, Integration, IntegrationProvider, SalesRecord};
use crate::error::DomainError;
use crate::report::display_amount;
use crate::repositories::IntegrationRepository;

/// Values available to message templates.
#[derive(Debug, Clone, Serialize)]
pub struct SaleNotification {
    pub record_id: Uuid,
    pub member: String,
    pub amount: i64,
    pub display_amount: f64,
    pub date: String,
    pub description: String,
}

impl SaleNotification {
    pub fn new(record: &SalesRecord, member_name: &str, amount_unit: i64) -> Self {
        Self {
            record_id: record.id,
            member: member_name.to_string(),
            amount: record.amount,
            display_amount: display_amount(record.amount, amount_unit),
            date: record.sale_date.format("%Y-%m-%d").to_string(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

/// Port for delivering messages to an external chat service.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    /// Render the integration's template (or the default message) and deliver it.
    async fn send_sale(&self, integration: &Integration, sale: &SaleNotification) -> Result<(), DomainError>;
    async fn send_text(&self, integration: &Integration, text: &str) -> Result<(), DomainError>;
}

pub struct IntegrationService {
    integrations: Arc<dyn IntegrationRepository>,
    sender: Arc<dyn WebhookSender>,
    audit: AuditService,
}

impl IntegrationService {
    pub fn new(
        integrations: Arc<dyn IntegrationRepository>,
        sender: Arc<dyn WebhookSender>,
        audit: AuditService,
    ) -> Self {
        Self {
            integrations,
            sender,
            audit,
        }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError> {
        self.integrations.list(tenant_id).await
    }

    /// Create or overwrite the tenant's integration for `provider`.
    pub async fn upsert(
        &self,
        scope: TenantScope,
        provider: IntegrationProvider,
        settings: IntegrationSettings,
    ) -> Result<Integration, DomainError> {
        let existing = self
            .integrations
            .list(scope.tenant_id)
            .await?
            .into_iter()
            .find(|i| i.provider == provider);

        let integration = match existing {
            Some(mut integration) => {
                integration.apply(settings)?;
                integration
            }
            None => Integration::new(scope.tenant_id, provider, settings)?,
        };

        let integration = self.integrations.upsert(&integration).await?;
        info!(
            "Integration {} saved for tenant {} (active: {})",
            provider.as_str(),
            scope.tenant_id,
            integration.is_active
        );
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::IntegrationUpsert,
                Some(integration.id),
                serde_json::json!({ "provider": provider.as_str(), "is_active": integration.is_active }),
            )
            .await;
        Ok(integration)
    }

    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        self.integrations.delete(scope.tenant_id, id).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::IntegrationDelete,
                Some(id),
                serde_json::json!({}),
            )
            .await;
        Ok(())
    }

    /// Send a test message. Delivery failures surface as `ExternalService`.
    pub async fn test(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let integration = self
            .integrations
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Integration"))?;

        self.sender
            .send_text(&integration, "Test message from the sales dashboard")
            .await
            .map_err(|e| match e {
                DomainError::ExternalService(_) => e,
                other => DomainError::ExternalService(other.to_string()),
            })
    }

    /// Notify every active integration of a new sale. Failures are logged
    /// and never returned.
    pub async fn notify_sale(&self, tenant_id: Uuid, sale: SaleNotification) {
        let integrations = match self.integrations.list_active(tenant_id).await {
            Ok(list) => list,
            Err(e) => {
                error!("Failed to load integrations for tenant {}: {}", tenant_id, e);
                return;
            }
        };

        for integration in integrations {
            match self.sender.send_sale(&integration, &sale).await {
                Ok(()) => info!(
                    "Sale {} sent to {} for tenant {}",
                    sale.record_id,
                    integration.provider.as_str(),
                    tenant_id
                ),
                Err(e) => error!(
                    "Sale notification via {} failed for tenant {}: {}",
                    integration.provider.as_str(),
                    tenant_id,
                    e
                ),
            }
        }
    }
}
