// ============================================================================
// Sales Infrastructure - PostgreSQL Display Config Repository
// File: crates/sales-infrastructure/src/database/postgres/display_config_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use sales_core::domain::{DisplayConfig, DisplayConfigView, Period, ViewType};
use sales_core::error::DomainError;
use sales_core::repositories::DisplayConfigRepository;

use super::db_error;

pub struct PgDisplayConfigRepository {
    pool: PgPool,
}

impl PgDisplayConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DisplayConfigRow {
    tenant_id: Uuid,
    interval_seconds: i32,
    auto_loop: bool,
    period: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct DisplayViewRow {
    view_type: String,
    custom_slide_id: Option<Uuid>,
    duration_seconds: i32,
    sort_order: i32,
    is_enabled: bool,
}

impl DisplayViewRow {
    fn into_view(self) -> Option<DisplayConfigView> {
        let Some(view_type) = ViewType::from_str(&self.view_type) else {
            warn!("Skipping display view with unknown type '{}'", self.view_type);
            return None;
        };
        Some(DisplayConfigView {
            view_type,
            custom_slide_id: self.custom_slide_id,
            duration_seconds: self.duration_seconds,
            sort_order: self.sort_order,
            is_enabled: self.is_enabled,
        })
    }
}

#[async_trait]
impl DisplayConfigRepository for PgDisplayConfigRepository {
    async fn find(&self, tenant_id: Uuid) -> Result<Option<DisplayConfig>, DomainError> {
        let row: Option<DisplayConfigRow> = sqlx::query_as(
            r#"
            SELECT tenant_id, interval_seconds, auto_loop, period, updated_at
            FROM display_configs
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding display config"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let views: Vec<DisplayViewRow> = sqlx::query_as(
            r#"
            SELECT view_type, custom_slide_id, duration_seconds, sort_order, is_enabled
            FROM display_config_views
            WHERE tenant_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing display views"))?;

        Ok(Some(DisplayConfig {
            tenant_id: row.tenant_id,
            interval_seconds: row.interval_seconds,
            auto_loop: row.auto_loop,
            period: Period::from_str(&row.period).unwrap_or_default(),
            views: views.into_iter().filter_map(DisplayViewRow::into_view).collect(),
            updated_at: row.updated_at,
        }))
    }

    /// Header and views are written in one transaction; views are replaced wholesale.
    async fn replace(&self, config: &DisplayConfig) -> Result<DisplayConfig, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting transaction"))?;

        let updated_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO display_configs (tenant_id, interval_seconds, auto_loop, period, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (tenant_id)
            DO UPDATE SET interval_seconds = EXCLUDED.interval_seconds,
                          auto_loop = EXCLUDED.auto_loop,
                          period = EXCLUDED.period,
                          updated_at = NOW()
            RETURNING updated_at
            "#,
        )
        .bind(config.tenant_id)
        .bind(config.interval_seconds)
        .bind(config.auto_loop)
        .bind(config.period.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("saving display config"))?;

        sqlx::query("DELETE FROM display_config_views WHERE tenant_id = $1")
            .bind(config.tenant_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clearing display views"))?;

        for view in &config.views {
            sqlx::query(
                r#"
                INSERT INTO display_config_views
                    (id, tenant_id, view_type, custom_slide_id, duration_seconds, sort_order, is_enabled)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(config.tenant_id)
            .bind(view.view_type.as_str())
            .bind(view.custom_slide_id)
            .bind(view.duration_seconds)
            .bind(view.sort_order)
            .bind(view.is_enabled)
            .execute(&mut *tx)
            .await
            .map_err(db_error("inserting display view"))?;
        }

        tx.commit().await.map_err(db_error("committing display config"))?;
        info!("Display config saved for tenant {} ({} views)", config.tenant_id, config.views.len());

        let mut saved = config.clone();
        saved.updated_at = updated_at;
        saved.sort_views();
        Ok(saved)
    }
}
