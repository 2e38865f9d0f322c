// ============================================================================
// Sales Infrastructure - PostgreSQL Member Repository
// File: crates/sales-infrastructure/src/database/postgres/member_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use sales_core::domain::Member;
use sales_core::error::DomainError;
use sales_core::repositories::MemberRepository;

use super::{db_error, expect_affected};

pub(crate) const MEMBER_COLUMNS: &str =
    "id, tenant_id, name, email, department_id, image_url, is_active, display_order, created_at, updated_at";

pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MemberRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    email: Option<String>,
    department_id: Option<Uuid>,
    image_url: Option<String>,
    is_active: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            email: row.email,
            department_id: row.department_id,
            image_url: row.image_url,
            is_active: row.is_active,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM members
            WHERE tenant_id = $1 AND ($2 OR is_active)
            ORDER BY display_order, name
            "#
        ))
        .bind(tenant_id)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing members"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding member"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, tenant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Member>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM members
            WHERE tenant_id = $1 AND id = ANY($2)
            ORDER BY display_order, name
            "#
        ))
        .bind(tenant_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding members by ids"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, member: &Member) -> Result<Member, DomainError> {
        let row: MemberRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO members ({MEMBER_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(member.id)
        .bind(member.tenant_id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.department_id)
        .bind(&member.image_url)
        .bind(member.is_active)
        .bind(member.display_order)
        .bind(member.created_at)
        .bind(member.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating member"))?;

        info!("Member created: {} (tenant {})", row.id, row.tenant_id);
        Ok(row.into())
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            r#"
            UPDATE members
            SET name = $3, email = $4, department_id = $5, image_url = $6,
                is_active = $7, display_order = $8, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(member.id)
        .bind(member.tenant_id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.department_id)
        .bind(&member.image_url)
        .bind(member.is_active)
        .bind(member.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating member"))?;

        row.map(Into::into).ok_or_else(|| DomainError::not_found("Member"))
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting member"))?;

        expect_affected(result.rows_affected(), "Member")
    }
}
