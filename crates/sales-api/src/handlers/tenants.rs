//! Tenant management (super admin only)

use axum::{extract::State, http::StatusCode};
use sales_core::domain::Tenant;
use uuid::Uuid;
use validator::Validate;

use super::{created, ok, JsonResponse};
use crate::dto::admin::{CreateTenantRequest, UpdateTenantRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::SuperAdmin;
use crate::response::Message;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, _admin: SuperAdmin) -> ApiResult<JsonResponse<Vec<Tenant>>> {
    Ok(ok(state.tenants.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    _admin: SuperAdmin,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Tenant>> {
    Ok(ok(state.tenants.get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    SuperAdmin(user): SuperAdmin,
    ApiJson(payload): ApiJson<CreateTenantRequest>,
) -> ApiResult<(StatusCode, JsonResponse<Tenant>)> {
    payload.validate()?;
    let tenant = state.tenants.create(user.user_id, payload.into()).await?;
    Ok(created(tenant))
}

pub async fn update(
    State(state): State<AppState>,
    SuperAdmin(user): SuperAdmin,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateTenantRequest>,
) -> ApiResult<JsonResponse<Tenant>> {
    payload.validate()?;
    Ok(ok(state.tenants.update(user.user_id, id, payload.into()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    SuperAdmin(user): SuperAdmin,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.tenants.delete(user.user_id, id).await?;
    Ok(ok(Message::new("Tenant deleted")))
}
