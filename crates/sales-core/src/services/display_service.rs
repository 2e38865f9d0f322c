//! Display-mode settings

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::{AuditAction, DisplayConfig, DisplayConfigView, Period, ViewType};
use crate::error::DomainError;
use crate::repositories::{CustomSlideRepository, DisplayConfigRepository};

#[derive(Debug, Clone)]
pub struct DisplayConfigInput {
    pub interval_seconds: i32,
    pub auto_loop: bool,
    pub period: Period,
    pub views: Vec<DisplayConfigView>,
}

pub struct DisplayService {
    configs: Arc<dyn DisplayConfigRepository>,
    slides: Arc<dyn CustomSlideRepository>,
    audit: AuditService,
}

impl DisplayService {
    pub fn new(
        configs: Arc<dyn DisplayConfigRepository>,
        slides: Arc<dyn CustomSlideRepository>,
        audit: AuditService,
    ) -> Self {
        Self { configs, slides, audit }
    }

    /// The tenant's config; defaults are stored on first read.
    pub async fn get(&self, tenant_id: Uuid) -> Result<DisplayConfig, DomainError> {
        if let Some(mut config) = self.configs.find(tenant_id).await? {
            config.sort_views();
            return Ok(config);
        }
        info!("Creating default display config for tenant {}", tenant_id);
        self.configs.replace(&DisplayConfig::default_for(tenant_id)).await
    }

    pub async fn update(&self, scope: TenantScope, input: DisplayConfigInput) -> Result<DisplayConfig, DomainError> {
        let mut config = DisplayConfig {
            tenant_id: scope.tenant_id,
            interval_seconds: input.interval_seconds,
            auto_loop: input.auto_loop,
            period: input.period,
            views: input.views,
            updated_at: chrono::Utc::now(),
        };
        config.check()?;
        config.sort_views();

        let referenced: HashSet<Uuid> = config
            .views
            .iter()
            .filter(|v| v.view_type == ViewType::CustomSlide)
            .filter_map(|v| v.custom_slide_id)
            .collect();
        if !referenced.is_empty() {
            let owned: HashSet<Uuid> = self
                .slides
                .list(scope.tenant_id)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect();
            if !referenced.is_subset(&owned) {
                return Err(DomainError::validation("CUSTOM_SLIDE views must reference a slide of this tenant"));
            }
        }

        let config = self.configs.replace(&config).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::DisplayConfigUpdate,
                None,
                serde_json::json!({ "views": config.views.len(), "period": config.period.as_str() }),
            )
            .await;
        Ok(config)
    }
}
