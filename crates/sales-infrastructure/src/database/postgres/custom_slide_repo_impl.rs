// ============================================================================
// Sales Infrastructure - PostgreSQL Custom Slide Repository
// File: crates/sales-infrastructure/src/database/postgres/custom_slide_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use sales_core::domain::{CustomSlide, SlideType};
use sales_core::error::DomainError;
use sales_core::repositories::CustomSlideRepository;

use super::{db_error, expect_affected};

const SLIDE_COLUMNS: &str =
    "id, tenant_id, slide_type, title, content, display_seconds, sort_order, is_active, created_at, updated_at";

pub struct PgCustomSlideRepository {
    pool: PgPool,
}

impl PgCustomSlideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomSlideRow {
    id: Uuid,
    tenant_id: Uuid,
    slide_type: String,
    title: Option<String>,
    content: String,
    display_seconds: i32,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomSlideRow> for CustomSlide {
    fn from(row: CustomSlideRow) -> Self {
        let slide_type = SlideType::from_str(&row.slide_type).unwrap_or_else(|| {
            warn!("Unknown slide type '{}' on slide {}", row.slide_type, row.id);
            SlideType::Text
        });
        CustomSlide {
            id: row.id,
            tenant_id: row.tenant_id,
            slide_type,
            title: row.title,
            content: row.content,
            display_seconds: row.display_seconds,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CustomSlideRepository for PgCustomSlideRepository {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<CustomSlide>, DomainError> {
        let rows: Vec<CustomSlideRow> = sqlx::query_as(&format!(
            "SELECT {SLIDE_COLUMNS} FROM custom_slides WHERE tenant_id = $1 ORDER BY sort_order, created_at"
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing custom slides"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<CustomSlide>, DomainError> {
        let row: Option<CustomSlideRow> = sqlx::query_as(&format!(
            "SELECT {SLIDE_COLUMNS} FROM custom_slides WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding custom slide"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, slide: &CustomSlide) -> Result<CustomSlide, DomainError> {
        let row: CustomSlideRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO custom_slides ({SLIDE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {SLIDE_COLUMNS}
            "#
        ))
        .bind(slide.id)
        .bind(slide.tenant_id)
        .bind(slide.slide_type.as_str())
        .bind(&slide.title)
        .bind(&slide.content)
        .bind(slide.display_seconds)
        .bind(slide.sort_order)
        .bind(slide.is_active)
        .bind(slide.created_at)
        .bind(slide.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating custom slide"))?;

        Ok(row.into())
    }

    async fn update(&self, slide: &CustomSlide) -> Result<CustomSlide, DomainError> {
        let row: Option<CustomSlideRow> = sqlx::query_as(&format!(
            r#"
            UPDATE custom_slides
            SET slide_type = $3, title = $4, content = $5, display_seconds = $6,
                sort_order = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING {SLIDE_COLUMNS}
            "#
        ))
        .bind(slide.id)
        .bind(slide.tenant_id)
        .bind(slide.slide_type.as_str())
        .bind(&slide.title)
        .bind(&slide.content)
        .bind(slide.display_seconds)
        .bind(slide.sort_order)
        .bind(slide.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating custom slide"))?;

        row.map(Into::into).ok_or_else(|| DomainError::not_found("Custom slide"))
    }

    /// Display views pointing at the slide go with it (ON DELETE CASCADE).
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM custom_slides WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting custom slide"))?;

        expect_affected(result.rows_affected(), "Custom slide")
    }
}
