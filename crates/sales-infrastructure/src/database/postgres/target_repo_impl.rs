// ============================================================================
// Sales Infrastructure - PostgreSQL Target Repository
// File: crates/sales-infrastructure/src/database/postgres/target_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sales_core::domain::{Target, YearMonth};
use sales_core::error::DomainError;
use sales_core::repositories::TargetRepository;

use super::db_error;

pub struct PgTargetRepository {
    pool: PgPool,
}

impl PgTargetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TargetRow {
    tenant_id: Uuid,
    member_id: Uuid,
    year: i32,
    month: i32,
    monthly: i64,
    quarterly: i64,
    annual: i64,
    updated_at: DateTime<Utc>,
}

impl From<TargetRow> for Target {
    fn from(row: TargetRow) -> Self {
        Target {
            tenant_id: row.tenant_id,
            member_id: row.member_id,
            year: row.year,
            month: row.month as u32,
            monthly: row.monthly,
            quarterly: row.quarterly,
            annual: row.annual,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TargetRepository for PgTargetRepository {
    async fn list_for_month(&self, tenant_id: Uuid, month: YearMonth) -> Result<Vec<Target>, DomainError> {
        let rows: Vec<TargetRow> = sqlx::query_as(
            r#"
            SELECT tenant_id, member_id, year, month, monthly, quarterly, annual, updated_at
            FROM targets
            WHERE tenant_id = $1 AND year = $2 AND month = $3
            "#,
        )
        .bind(tenant_id)
        .bind(month.year)
        .bind(month.month as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing monthly targets"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_year(&self, tenant_id: Uuid, year: i32) -> Result<Vec<Target>, DomainError> {
        let rows: Vec<TargetRow> = sqlx::query_as(
            r#"
            SELECT tenant_id, member_id, year, month, monthly, quarterly, annual, updated_at
            FROM targets
            WHERE tenant_id = $1 AND year = $2
            ORDER BY month
            "#,
        )
        .bind(tenant_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing yearly targets"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, targets: &[Target]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting transaction"))?;

        for target in targets {
            sqlx::query(
                r#"
                INSERT INTO targets (tenant_id, member_id, year, month, monthly, quarterly, annual, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
                ON CONFLICT (tenant_id, member_id, year, month)
                DO UPDATE SET monthly = EXCLUDED.monthly,
                              quarterly = EXCLUDED.quarterly,
                              annual = EXCLUDED.annual,
                              updated_at = NOW()
                "#,
            )
            .bind(target.tenant_id)
            .bind(target.member_id)
            .bind(target.year)
            .bind(target.month as i32)
            .bind(target.monthly)
            .bind(target.quarterly)
            .bind(target.annual)
            .execute(&mut *tx)
            .await
            .map_err(db_error("upserting target"))?;
        }

        tx.commit().await.map_err(db_error("committing targets"))
    }
}
