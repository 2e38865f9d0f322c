// ============================================================================
// Sales Infrastructure - PostgreSQL System Setting Repository
// File: crates/sales-infrastructure/src/database/postgres/system_setting_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use sales_core::domain::SystemSetting;
use sales_core::error::DomainError;
use sales_core::repositories::SystemSettingRepository;

use super::db_error;

pub struct PgSystemSettingRepository {
    pool: PgPool,
}

impl PgSystemSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SystemSettingRow {
    key: String,
    value: String,
    updated_at: DateTime<Utc>,
}

impl From<SystemSettingRow> for SystemSetting {
    fn from(row: SystemSettingRow) -> Self {
        SystemSetting {
            key: row.key,
            value: row.value,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SystemSettingRepository for PgSystemSettingRepository {
    async fn list(&self) -> Result<Vec<SystemSetting>, DomainError> {
        let rows: Vec<SystemSettingRow> =
            sqlx::query_as("SELECT key, value, updated_at FROM system_settings ORDER BY key")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("listing system settings"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, key: &str) -> Result<Option<SystemSetting>, DomainError> {
        let row: Option<SystemSettingRow> =
            sqlx::query_as("SELECT key, value, updated_at FROM system_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("reading system setting"))?;

        Ok(row.map(Into::into))
    }

    async fn set(&self, key: &str, value: &str) -> Result<SystemSetting, DomainError> {
        let row: SystemSettingRow = sqlx::query_as(
            r#"
            INSERT INTO system_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING key, value, updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("writing system setting"))?;

        Ok(row.into())
    }
}
