// ============================================================================
// Sales Infrastructure - PostgreSQL Integration Repository
// File: crates/sales-infrastructure/src/database/postgres/integration_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use sales_core::domain::{Integration, IntegrationProvider};
use sales_core::error::DomainError;
use sales_core::repositories::IntegrationRepository;

use super::{db_error, expect_affected};

const INTEGRATION_COLUMNS: &str =
    "id, tenant_id, provider, webhook_url, api_token, room_id, message_template, is_active, created_at, updated_at";

pub struct PgIntegrationRepository {
    pool: PgPool,
}

impl PgIntegrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IntegrationRow {
    id: Uuid,
    tenant_id: Uuid,
    provider: String,
    webhook_url: Option<String>,
    api_token: Option<String>,
    room_id: Option<String>,
    message_template: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IntegrationRow {
    fn into_integration(self) -> Option<Integration> {
        let Some(provider) = IntegrationProvider::from_str(&self.provider) else {
            warn!("Skipping integration {} with unknown provider '{}'", self.id, self.provider);
            return None;
        };
        Some(Integration {
            id: self.id,
            tenant_id: self.tenant_id,
            provider,
            webhook_url: self.webhook_url,
            api_token: self.api_token,
            room_id: self.room_id,
            message_template: self.message_template,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl IntegrationRepository for PgIntegrationRepository {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError> {
        let rows: Vec<IntegrationRow> = sqlx::query_as(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM integrations WHERE tenant_id = $1 ORDER BY provider"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing integrations"))?;

        Ok(rows.into_iter().filter_map(IntegrationRow::into_integration).collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Integration>, DomainError> {
        let row: Option<IntegrationRow> = sqlx::query_as(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM integrations WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding integration"))?;

        Ok(row.and_then(IntegrationRow::into_integration))
    }

    /// One row per (tenant, provider); the existing id survives an update.
    async fn upsert(&self, integration: &Integration) -> Result<Integration, DomainError> {
        let row: IntegrationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO integrations ({INTEGRATION_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (tenant_id, provider)
            DO UPDATE SET webhook_url = EXCLUDED.webhook_url,
                          api_token = EXCLUDED.api_token,
                          room_id = EXCLUDED.room_id,
                          message_template = EXCLUDED.message_template,
                          is_active = EXCLUDED.is_active,
                          updated_at = NOW()
            RETURNING {INTEGRATION_COLUMNS}
            "#
        ))
        .bind(integration.id)
        .bind(integration.tenant_id)
        .bind(integration.provider.as_str())
        .bind(&integration.webhook_url)
        .bind(&integration.api_token)
        .bind(&integration.room_id)
        .bind(&integration.message_template)
        .bind(integration.is_active)
        .bind(integration.created_at)
        .bind(integration.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("upserting integration"))?;

        info!("Integration {} saved for tenant {}", row.provider, row.tenant_id);
        row.into_integration()
            .ok_or_else(|| DomainError::InternalError("stored integration has unknown provider".to_string()))
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM integrations WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting integration"))?;

        expect_affected(result.rows_affected(), "Integration")
    }

    async fn list_active(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError> {
        let rows: Vec<IntegrationRow> = sqlx::query_as(&format!(
            "SELECT {INTEGRATION_COLUMNS} FROM integrations WHERE tenant_id = $1 AND is_active ORDER BY provider"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing active integrations"))?;

        Ok(rows.into_iter().filter_map(IntegrationRow::into_integration).collect())
    }
}
