//! Sales records, dashboard, report, CSV export and the live stream

use std::convert::Infallible;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use chrono::{Local, NaiveDate};
use futures::{Stream, StreamExt};
use sales_core::domain::SalesRecord;
use sales_core::report::{DashboardSummary, SalesReport};
use sales_core::services::{ImportSummary, SalesRecordView};
use sales_shared::types::Page;
use tracing::info;
use uuid::Uuid;

use super::{created, ok, JsonResponse};
use crate::csv;
use crate::dto::sales::{DashboardParams, ImportRequest, RecordQuery, ReportParams, SaleRequest, StreamHello};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /api/sales: ranking, totals and cumulative trend for one period.
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(params): ApiQuery<DashboardParams>,
) -> ApiResult<JsonResponse<DashboardSummary>> {
    let query = params.into_query(today())?;
    Ok(ok(state.reports.dashboard(ctx.tenant_id(), query).await?))
}

/// POST /api/sales
pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<SaleRequest>,
) -> ApiResult<(StatusCode, JsonResponse<SalesRecord>)> {
    Ok(created(state.sales.create(ctx.scope, payload.into()).await?))
}

/// POST /api/sales/import
pub async fn import(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<ImportRequest>,
) -> ApiResult<JsonResponse<ImportSummary>> {
    let rows = payload.into_rows()?;
    Ok(ok(state.sales.import(ctx.scope, rows).await?))
}

/// GET /api/sales/records
pub async fn list_records(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> ApiResult<JsonResponse<Page<SalesRecordView>>> {
    let page = state
        .sales
        .list(ctx.tenant_id(), &query.filter(), query.pagination())
        .await?;
    Ok(ok(page))
}

pub async fn get_record(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<SalesRecord>> {
    Ok(ok(state.sales.get(ctx.tenant_id(), id).await?))
}

pub async fn update_record(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SaleRequest>,
) -> ApiResult<JsonResponse<SalesRecord>> {
    Ok(ok(state.sales.update(ctx.scope, id, payload.into()).await?))
}

pub async fn delete_record(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.sales.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Sales record deleted")))
}

/// GET /api/sales/records/export: same filters as the list, every page.
pub async fn export(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> ApiResult<Response> {
    let data = state.sales.export(ctx.tenant_id(), &query.filter()).await?;
    info!(
        "Exporting {} sales records for tenant {}",
        data.records.len(),
        ctx.tenant_id()
    );

    let filename = format!("sales_{}.csv", today().format("%Y%m%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv::render_sales(&data),
    )
        .into_response())
}

/// GET /api/sales/report?start_month=YYYY-MM&end_month=YYYY-MM
pub async fn report(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> ApiResult<JsonResponse<SalesReport>> {
    let today = today();
    let query = params.into_query(today)?;
    Ok(ok(state.reports.report(ctx.tenant_id(), query, today).await?))
}

/// GET /api/sales/stream
pub async fn stream(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let tenant_id = ctx.tenant_id();
    let events = state.events.tenant_stream(tenant_id);
    info!("SSE subscriber connected for tenant {}", tenant_id);

    let stream = async_stream::stream! {
        yield Ok(create_sse_event("connected", &StreamHello { tenant_id }));

        let mut events = Box::pin(events);
        while let Some(event) = events.next().await {
            yield Ok(create_sse_event("sales_updated", &event));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn create_sse_event<T: serde::Serialize>(event_type: &str, data: &T) -> Event {
    Event::default()
        .event(event_type)
        .data(serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string()))
}
