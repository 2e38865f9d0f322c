//! Member groups and their membership

use axum::{extract::State, http::StatusCode};
use sales_core::domain::{Group, GroupWithMembers, Member};
use serde::Serialize;
use uuid::Uuid;

use super::{created, ok, JsonResponse};
use crate::dto::organization::{GroupRequest, SyncMembersRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GroupMembersResponse {
    pub group_id: Uuid,
    pub member_ids: Vec<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> ApiResult<JsonResponse<Vec<GroupWithMembers>>> {
    Ok(ok(state.groups.list(ctx.tenant_id()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Group>> {
    Ok(ok(state.groups.get(ctx.tenant_id(), id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<GroupRequest>,
) -> ApiResult<(StatusCode, JsonResponse<Group>)> {
    Ok(created(state.groups.create(ctx.scope, payload.into()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<GroupRequest>,
) -> ApiResult<JsonResponse<Group>> {
    Ok(ok(state.groups.update(ctx.scope, id, payload.into()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.groups.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Group deleted")))
}

/// GET /api/groups/{id}/members
pub async fn members(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Vec<Member>>> {
    Ok(ok(state.groups.members(ctx.tenant_id(), id).await?))
}

/// PUT /api/groups/{id}/members replaces the whole membership.
pub async fn sync_members(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SyncMembersRequest>,
) -> ApiResult<JsonResponse<GroupMembersResponse>> {
    let member_ids = state.groups.sync_members(ctx.scope, id, payload.member_ids).await?;
    Ok(ok(GroupMembersResponse { group_id: id, member_ids }))
}
