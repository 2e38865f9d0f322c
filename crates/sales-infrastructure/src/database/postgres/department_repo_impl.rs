// ============================================================================
// Sales Infrastructure - PostgreSQL Department Repository
// File: crates/sales-infrastructure/src/database/postgres/department_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sales_core::domain::Department;
use sales_core::error::DomainError;
use sales_core::repositories::DepartmentRepository;

use super::{db_error, expect_affected, map_db_error};

pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DepartmentRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Department>, DomainError> {
        let rows: Vec<DepartmentRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, created_at, updated_at
            FROM departments
            WHERE tenant_id = $1
            ORDER BY name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing departments"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Department>, DomainError> {
        let row: Option<DepartmentRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, created_at, updated_at
            FROM departments
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding department"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, department: &Department) -> Result<Department, DomainError> {
        let row: DepartmentRow = sqlx::query_as(
            r#"
            INSERT INTO departments (id, tenant_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, tenant_id, name, created_at, updated_at
            "#,
        )
        .bind(department.id)
        .bind(department.tenant_id)
        .bind(&department.name)
        .bind(department.created_at)
        .bind(department.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("creating department", "duplicate department name"))?;

        Ok(row.into())
    }

    async fn update(&self, department: &Department) -> Result<Department, DomainError> {
        let row: Option<DepartmentRow> = sqlx::query_as(
            r#"
            UPDATE departments
            SET name = $3, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, name, created_at, updated_at
            "#,
        )
        .bind(department.id)
        .bind(department.tenant_id)
        .bind(&department.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("updating department", "duplicate department name"))?;

        row.map(Into::into).ok_or_else(|| DomainError::not_found("Department"))
    }

    /// Members keep existing; the foreign key nulls their department.
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting department"))?;

        expect_affected(result.rows_affected(), "Department")
    }
}
