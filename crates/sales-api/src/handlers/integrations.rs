//! Messaging integrations

use axum::extract::State;
use sales_core::domain::Integration;
use uuid::Uuid;

use super::{ok, JsonResponse};
use crate::dto::settings::IntegrationRequest;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, ctx: TenantContext) -> ApiResult<JsonResponse<Vec<Integration>>> {
    Ok(ok(state.integrations.list(ctx.tenant_id()).await?))
}

/// PUT /api/integrations creates or replaces the tenant's integration for a provider.
pub async fn upsert(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<IntegrationRequest>,
) -> ApiResult<JsonResponse<Integration>> {
    let (provider, settings) = payload.into_parts();
    Ok(ok(state.integrations.upsert(ctx.scope, provider, settings).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.integrations.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Integration deleted")))
}

/// POST /api/integrations/{id}/test, delivery failures surface as 502.
pub async fn test(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.integrations.test(ctx.tenant_id(), id).await?;
    Ok(ok(Message::new("Test message sent")))
}
