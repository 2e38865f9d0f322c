//! Sales members

use axum::{extract::State, http::StatusCode};
use sales_core::domain::Member;
use uuid::Uuid;
use validator::Validate;

use super::{created, ok, JsonResponse};
use crate::dto::organization::MemberRequest;
use crate::dto::IncludeInactiveQuery;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

/// GET /api/members?include_inactive=
pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiQuery(query): ApiQuery<IncludeInactiveQuery>,
) -> ApiResult<JsonResponse<Vec<Member>>> {
    let members = state.members.list(ctx.tenant_id(), query.include_inactive).await?;
    Ok(ok(members))
}

pub async fn get(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Member>> {
    Ok(ok(state.members.get(ctx.tenant_id(), id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<MemberRequest>,
) -> ApiResult<(StatusCode, JsonResponse<Member>)> {
    payload.validate()?;
    Ok(created(state.members.create(ctx.scope, payload.into()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<MemberRequest>,
) -> ApiResult<JsonResponse<Member>> {
    payload.validate()?;
    Ok(ok(state.members.update(ctx.scope, id, payload.into()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.members.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Member deleted")))
}
