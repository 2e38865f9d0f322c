// ============================================================================
// Sales Infrastructure - PostgreSQL Custom Field Repository
// File: crates/sales-infrastructure/src/database/postgres/custom_field_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use sales_core::domain::{CustomFieldDefinition, CustomFieldType};
use sales_core::error::DomainError;
use sales_core::repositories::CustomFieldRepository;

use super::{db_error, expect_affected, map_db_error};

const FIELD_COLUMNS: &str =
    "id, tenant_id, name, field_type, is_required, options, sort_order, is_active, created_at, updated_at";

pub struct PgCustomFieldRepository {
    pool: PgPool,
}

impl PgCustomFieldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomFieldRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    field_type: String,
    is_required: bool,
    options: Json<Vec<String>>,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomFieldRow> for CustomFieldDefinition {
    fn from(row: CustomFieldRow) -> Self {
        let field_type = CustomFieldType::from_str(&row.field_type).unwrap_or_else(|| {
            warn!("Unknown field type '{}' on field {}", row.field_type, row.id);
            CustomFieldType::Text
        });
        CustomFieldDefinition {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            field_type,
            is_required: row.is_required,
            options: row.options.0,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CustomFieldRepository for PgCustomFieldRepository {
    async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<CustomFieldDefinition>, DomainError> {
        let rows: Vec<CustomFieldRow> = sqlx::query_as(&format!(
            r#"
            SELECT {FIELD_COLUMNS}
            FROM custom_field_definitions
            WHERE tenant_id = $1 AND ($2 OR is_active)
            ORDER BY sort_order, name
            "#
        ))
        .bind(tenant_id)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing custom fields"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<CustomFieldDefinition>, DomainError> {
        let row: Option<CustomFieldRow> = sqlx::query_as(&format!(
            "SELECT {FIELD_COLUMNS} FROM custom_field_definitions WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding custom field"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, field: &CustomFieldDefinition) -> Result<CustomFieldDefinition, DomainError> {
        let row: CustomFieldRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO custom_field_definitions ({FIELD_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {FIELD_COLUMNS}
            "#
        ))
        .bind(field.id)
        .bind(field.tenant_id)
        .bind(&field.name)
        .bind(field.field_type.as_str())
        .bind(field.is_required)
        .bind(Json(&field.options))
        .bind(field.sort_order)
        .bind(field.is_active)
        .bind(field.created_at)
        .bind(field.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("creating custom field", "duplicate field name"))?;

        info!("Custom field created: {} ({})", row.name, row.id);
        Ok(row.into())
    }

    async fn update(&self, field: &CustomFieldDefinition) -> Result<CustomFieldDefinition, DomainError> {
        let row: Option<CustomFieldRow> = sqlx::query_as(&format!(
            r#"
            UPDATE custom_field_definitions
            SET name = $3, field_type = $4, is_required = $5, options = $6,
                sort_order = $7, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING {FIELD_COLUMNS}
            "#
        ))
        .bind(field.id)
        .bind(field.tenant_id)
        .bind(&field.name)
        .bind(field.field_type.as_str())
        .bind(field.is_required)
        .bind(Json(&field.options))
        .bind(field.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("updating custom field", "duplicate field name"))?;

        row.map(Into::into).ok_or_else(|| DomainError::not_found("Custom field"))
    }

    async fn deactivate(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE custom_field_definitions SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("deactivating custom field"))?;

        expect_affected(result.rows_affected(), "Custom field")
    }
}
