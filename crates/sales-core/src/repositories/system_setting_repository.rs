//! System setting repository trait (port)

use async_trait::async_trait;

use crate::domain::SystemSetting;
use crate::error::DomainError;

#[async_trait]
pub trait SystemSettingRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<SystemSetting>, DomainError>;
    async fn get(&self, key: &str) -> Result<Option<SystemSetting>, DomainError>;
    async fn set(&self, key: &str, value: &str) -> Result<SystemSetting, DomainError>;
}
