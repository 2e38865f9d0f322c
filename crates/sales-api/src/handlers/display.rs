//! Display-mode rotation settings

use axum::extract::State;
use sales_core::domain::DisplayConfig;

use super::{ok, JsonResponse};
use crate::dto::settings::DisplayRequest;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::middleware::TenantContext;
use crate::state::AppState;

/// GET /api/settings/display, defaults are created on first read.
pub async fn get(State(state): State<AppState>, ctx: TenantContext) -> ApiResult<JsonResponse<DisplayConfig>> {
    Ok(ok(state.display.get(ctx.tenant_id()).await?))
}

/// PUT /api/settings/display replaces the config and every view.
pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<DisplayRequest>,
) -> ApiResult<JsonResponse<DisplayConfig>> {
    Ok(ok(state.display.update(ctx.scope, payload.into()).await?))
}
