//! System-wide settings (super admin only)

use std::sync::Arc;

use uuid::Uuid;

use super::audit_service::AuditService;
use crate::domain::{AuditAction, SystemSetting};
use crate::error::DomainError;
use crate::repositories::SystemSettingRepository;

const MAX_KEY_LENGTH: usize = 100;
const MAX_VALUE_LENGTH: usize = 10_000;

pub struct SettingService {
    settings: Arc<dyn SystemSettingRepository>,
    audit: AuditService,
}

impl SettingService {
    pub fn new(settings: Arc<dyn SystemSettingRepository>, audit: AuditService) -> Self {
        Self { settings, audit }
    }

    pub async fn list(&self) -> Result<Vec<SystemSetting>, DomainError> {
        self.settings.list().await
    }

    pub async fn get(&self, key: &str) -> Result<SystemSetting, DomainError> {
        self.settings
            .get(key)
            .await?
            .ok_or_else(|| DomainError::not_found("Setting"))
    }

    pub async fn set(&self, actor: Uuid, key: &str, value: &str) -> Result<SystemSetting, DomainError> {
        check_key(key)?;
        if value.len() > MAX_VALUE_LENGTH {
            return Err(DomainError::validation("Setting value too long"));
        }

        let setting = self.settings.set(key, value).await?;
        self.audit
            .record(
                None,
                Some(actor),
                AuditAction::SystemSettingUpdate,
                None,
                serde_json::json!({ "key": key }),
            )
            .await;
        Ok(setting)
    }
}

fn check_key(key: &str) -> Result<(), DomainError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation(
            "Setting keys use lowercase letters, digits, '.', '_' and '-'",
        ))
    }
}
