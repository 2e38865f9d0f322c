//! Admin accounts of the current tenant

use axum::{extract::State, http::StatusCode};
use sales_core::domain::User;
use uuid::Uuid;
use validator::Validate;

use super::{created, ok, JsonResponse};
use crate::dto::admin::CreateUserRequest;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, ctx: TenantContext) -> ApiResult<JsonResponse<Vec<User>>> {
    Ok(ok(state.users.list(ctx.tenant_id()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, JsonResponse<User>)> {
    payload.validate()?;
    Ok(created(state.users.create(ctx.scope, payload.into()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.users.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("User deleted")))
}
