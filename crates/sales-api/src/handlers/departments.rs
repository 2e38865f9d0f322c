use axum::{extract::State, http::StatusCode};
use sales_core::domain::Department;
use uuid::Uuid;

use super::{created, ok, JsonResponse};
use crate::dto::organization::DepartmentRequest;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, ctx: TenantContext) -> ApiResult<JsonResponse<Vec<Department>>> {
    Ok(ok(state.departments.list(ctx.tenant_id()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<DepartmentRequest>,
) -> ApiResult<(StatusCode, JsonResponse<Department>)> {
    Ok(created(state.departments.create(ctx.scope, payload.name).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<DepartmentRequest>,
) -> ApiResult<JsonResponse<Department>> {
    Ok(ok(state.departments.update(ctx.scope, id, payload.name).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.departments.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Department deleted")))
}
