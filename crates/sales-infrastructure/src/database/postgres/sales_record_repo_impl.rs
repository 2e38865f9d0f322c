// ============================================================================
// Sales Infrastructure - PostgreSQL Sales Record Repository
// File: crates/sales-infrastructure/src/database/postgres/sales_record_repo_impl.rs
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use sales_core::domain::{SalesFilter, SalesRecord, SalesRecordWithMember};
use sales_core::error::DomainError;
use sales_core::repositories::SalesRecordRepository;
use sales_shared::types::{Page, Pagination};

use super::{db_error, expect_affected};

const RECORD_COLUMNS: &str =
    "id, tenant_id, member_id, amount, sale_date, description, custom_fields, created_by, created_at, updated_at";

// Optional filters collapse to TRUE when unbound. An empty member list matches nothing.
const FILTER_CLAUSE: &str = r#"
    r.tenant_id = $1
    AND ($2::date IS NULL OR r.sale_date >= $2)
    AND ($3::date IS NULL OR r.sale_date <= $3)
    AND ($4::uuid[] IS NULL OR r.member_id = ANY($4))
"#;

pub struct PgSalesRecordRepository {
    pool: PgPool,
}

impl PgSalesRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SalesRecordRow {
    id: Uuid,
    tenant_id: Uuid,
    member_id: Uuid,
    amount: i64,
    sale_date: NaiveDate,
    description: Option<String>,
    custom_fields: Json<BTreeMap<String, String>>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SalesRecordRow> for SalesRecord {
    fn from(row: SalesRecordRow) -> Self {
        SalesRecord {
            id: row.id,
            tenant_id: row.tenant_id,
            member_id: row.member_id,
            amount: row.amount,
            sale_date: row.sale_date,
            description: row.description,
            custom_fields: row.custom_fields.0,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct RecordWithMemberRow {
    #[sqlx(flatten)]
    record: SalesRecordRow,
    member_name: String,
}

impl From<RecordWithMemberRow> for SalesRecordWithMember {
    fn from(row: RecordWithMemberRow) -> Self {
        SalesRecordWithMember {
            record: row.record.into(),
            member_name: row.member_name,
        }
    }
}

fn joined_select() -> String {
    format!(
        r#"
        SELECT r.id, r.tenant_id, r.member_id, r.amount, r.sale_date, r.description,
               r.custom_fields, r.created_by, r.created_at, r.updated_at,
               m.name AS member_name
        FROM sales_records r
        JOIN members m ON m.id = r.member_id
        WHERE {FILTER_CLAUSE}
        ORDER BY r.sale_date DESC, r.created_at DESC
        "#
    )
}

#[async_trait]
impl SalesRecordRepository for PgSalesRecordRepository {
    async fn create(&self, record: &SalesRecord) -> Result<SalesRecord, DomainError> {
        let row: SalesRecordRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO sales_records ({RECORD_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(record.id)
        .bind(record.tenant_id)
        .bind(record.member_id)
        .bind(record.amount)
        .bind(record.sale_date)
        .bind(&record.description)
        .bind(Json(&record.custom_fields))
        .bind(record.created_by)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating sales record"))?;

        Ok(row.into())
    }

    async fn create_many(&self, records: &[SalesRecord]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await.map_err(db_error("starting transaction"))?;

        for record in records {
            sqlx::query(&format!(
                "INSERT INTO sales_records ({RECORD_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
            ))
            .bind(record.id)
            .bind(record.tenant_id)
            .bind(record.member_id)
            .bind(record.amount)
            .bind(record.sale_date)
            .bind(&record.description)
            .bind(Json(&record.custom_fields))
            .bind(record.created_by)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error("importing sales record"))?;
        }

        tx.commit().await.map_err(db_error("committing import"))?;
        info!("Imported {} sales records", records.len());
        Ok(())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<SalesRecord>, DomainError> {
        let row: Option<SalesRecordRow> = sqlx::query_as(&format!(
            "SELECT {RECORD_COLUMNS} FROM sales_records WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding sales record"))?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, record: &SalesRecord) -> Result<SalesRecord, DomainError> {
        let row: Option<SalesRecordRow> = sqlx::query_as(&format!(
            r#"
            UPDATE sales_records
            SET member_id = $3, amount = $4, sale_date = $5, description = $6,
                custom_fields = $7, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(record.id)
        .bind(record.tenant_id)
        .bind(record.member_id)
        .bind(record.amount)
        .bind(record.sale_date)
        .bind(&record.description)
        .bind(Json(&record.custom_fields))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating sales record"))?;

        row.map(Into::into).ok_or_else(|| DomainError::not_found("Sales record"))
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sales_records WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting sales record"))?;

        expect_affected(result.rows_affected(), "Sales record")
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &SalesFilter,
        pagination: Pagination,
    ) -> Result<Page<SalesRecordWithMember>, DomainError> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM sales_records r WHERE {FILTER_CLAUSE}"
        ))
        .bind(tenant_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.member_ids.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting sales records"))?;

        let rows: Vec<RecordWithMemberRow> = sqlx::query_as(&format!("{} LIMIT $5 OFFSET $6", joined_select()))
            .bind(tenant_id)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(filter.member_ids.as_deref())
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing sales records"))?;

        Ok(Page::new(rows.into_iter().map(Into::into).collect(), total, pagination))
    }

    async fn list_all(
        &self,
        tenant_id: Uuid,
        filter: &SalesFilter,
    ) -> Result<Vec<SalesRecordWithMember>, DomainError> {
        let rows: Vec<RecordWithMemberRow> = sqlx::query_as(&joined_select())
            .bind(tenant_id)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(filter.member_ids.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing all sales records"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
