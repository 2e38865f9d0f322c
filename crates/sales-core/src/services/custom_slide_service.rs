//! Custom slides for display mode

use std::sync::Arc;

use uuid::Uuid;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::custom_slide::SlideContent;
use crate::domain::{AuditAction, CustomSlide};
use crate::error::DomainError;
use crate::repositories::CustomSlideRepository;

pub struct CustomSlideService {
    slides: Arc<dyn CustomSlideRepository>,
    audit: AuditService,
}

impl CustomSlideService {
    pub fn new(slides: Arc<dyn CustomSlideRepository>, audit: AuditService) -> Self {
        Self { slides, audit }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<CustomSlide>, DomainError> {
        self.slides.list(tenant_id).await
    }

    pub async fn create(&self, scope: TenantScope, input: SlideContent) -> Result<CustomSlide, DomainError> {
        let slide = CustomSlide::new(scope.tenant_id, input)?;
        let slide = self.slides.create(&slide).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::CustomSlideCreate,
                Some(slide.id),
                serde_json::json!({ "slide_type": slide.slide_type.as_str() }),
            )
            .await;
        Ok(slide)
    }

    pub async fn update(&self, scope: TenantScope, id: Uuid, input: SlideContent) -> Result<CustomSlide, DomainError> {
        let mut slide = self
            .slides
            .find_by_id(scope.tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Custom slide"))?;
        slide.apply(input)?;

        let slide = self.slides.update(&slide).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::CustomSlideUpdate,
                Some(id),
                serde_json::json!({ "slide_type": slide.slide_type.as_str() }),
            )
            .await;
        Ok(slide)
    }

    /// Display views pointing at the slide are removed with it.
    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        self.slides.delete(scope.tenant_id, id).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::CustomSlideDelete,
                Some(id),
                serde_json::json!({}),
            )
            .await;
        Ok(())
    }
}
