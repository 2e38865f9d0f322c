use axum::extract::State;
use sales_core::domain::AuditLog;
use sales_shared::types::Page;

use super::{ok, JsonResponse};
use crate::dto::PageQuery;
use crate::error::ApiResult;
use crate::extract::ApiQuery;
use crate::middleware::TenantContext;
use crate::state::AppState;

/// GET /api/audit-logs, newest first.
pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<JsonResponse<Page<AuditLog>>> {
    Ok(ok(state.audit.list(ctx.tenant_id(), query.pagination()).await?))
}
