//! Tenant-defined sales record fields

use axum::{extract::State, http::StatusCode};
use sales_core::domain::CustomFieldDefinition;
use uuid::Uuid;

use super::{created, ok, JsonResponse};
use crate::dto::settings::CustomFieldRequest;
use crate::dto::IncludeInactiveQuery;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(query): ApiQuery<IncludeInactiveQuery>,
) -> ApiResult<JsonResponse<Vec<CustomFieldDefinition>>> {
    let fields = state.custom_fields.list(ctx.tenant_id(), query.include_inactive).await?;
    Ok(ok(fields))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<CustomFieldRequest>,
) -> ApiResult<(StatusCode, JsonResponse<CustomFieldDefinition>)> {
    Ok(created(state.custom_fields.create(ctx.scope, payload.into()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CustomFieldRequest>,
) -> ApiResult<JsonResponse<CustomFieldDefinition>> {
    Ok(ok(state.custom_fields.update(ctx.scope, id, payload.into()).await?))
}

/// Deactivates the field; stored record values stay resolvable.
pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.custom_fields.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Custom field deactivated")))
}
