// ============================================================================
// Sales Infrastructure - PostgreSQL Audit Log Repository
// File: crates/sales-infrastructure/src/database/postgres/audit_log_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sales_core::domain::AuditLog;
use sales_core::error::DomainError;
use sales_core::repositories::AuditLogRepository;
use sales_shared::types::{Page, Pagination};

use super::db_error;

pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: Uuid,
    tenant_id: Option<Uuid>,
    user_id: Option<Uuid>,
    action: String,
    entity_type: String,
    entity_id: Option<Uuid>,
    details: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLog {
    fn from(row: AuditLogRow) -> Self {
        AuditLog {
            id: row.id,
            tenant_id: row.tenant_id,
            user_id: row.user_id,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            details: row.details.0,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn append(&self, entry: &AuditLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, tenant_id, user_id, action, entity_type, entity_id, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.tenant_id)
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(Json(&entry.details))
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("appending audit log"))?;

        Ok(())
    }

    async fn list(&self, tenant_id: Uuid, pagination: Pagination) -> Result<Page<AuditLog>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting audit logs"))?;

        let rows: Vec<AuditLogRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, user_id, action, entity_type, entity_id, details, created_at
            FROM audit_logs
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing audit logs"))?;

        Ok(Page::new(rows.into_iter().map(Into::into).collect(), total, pagination))
    }
}
