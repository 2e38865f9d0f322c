use axum::extract::State;
use sales_core::domain::Target;
use sales_core::services::MemberTarget;

use super::{ok, JsonResponse};
use crate::dto::settings::{TargetsQuery, TargetsRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::TenantContext;
use crate::state::AppState;

/// GET /api/targets?year=&month=
pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(query): ApiQuery<TargetsQuery>,
) -> ApiResult<JsonResponse<Vec<MemberTarget>>> {
    let month = query.year_month()?;
    Ok(ok(state.targets.list(ctx.tenant_id(), month).await?))
}

/// PUT /api/targets
pub async fn upsert(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<TargetsRequest>,
) -> ApiResult<JsonResponse<Vec<Target>>> {
    let (month, items) = payload.into_parts()?;
    Ok(ok(state.targets.upsert(ctx.scope, month, items).await?))
}
