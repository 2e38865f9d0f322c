use axum::{extract::State, http::StatusCode};
use sales_core::domain::CustomSlide;
use uuid::Uuid;

use super::{created, ok, JsonResponse};
use crate::dto::settings::SlideRequest;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::TenantContext;
use crate::response::Message;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, ctx: TenantContext) -> ApiResult<JsonResponse<Vec<CustomSlide>>> {
    Ok(ok(state.custom_slides.list(ctx.tenant_id()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiJson(payload): ApiJson<SlideRequest>,
) -> ApiResult<(StatusCode, JsonResponse<CustomSlide>)> {
    Ok(created(state.custom_slides.create(ctx.scope, payload.into()).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SlideRequest>,
) -> ApiResult<JsonResponse<CustomSlide>> {
    Ok(ok(state.custom_slides.update(ctx.scope, id, payload.into()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ctx: TenantContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<JsonResponse<Message>> {
    state.custom_slides.delete(ctx.scope, id).await?;
    Ok(ok(Message::new("Slide deleted")))
}
