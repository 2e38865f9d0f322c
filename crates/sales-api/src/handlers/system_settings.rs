//! Global key/value settings (super admin only)

use axum::extract::State;
use sales_core::domain::SystemSetting;

use super::{ok, JsonResponse};
use crate::dto::admin::SystemSettingRequest;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::SuperAdmin;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, _admin: SuperAdmin) -> ApiResult<JsonResponse<Vec<SystemSetting>>> {
    Ok(ok(state.settings.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    _admin: SuperAdmin,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<JsonResponse<SystemSetting>> {
    Ok(ok(state.settings.get(&key).await?))
}

pub async fn set(
    State(state): State<AppState>,
    SuperAdmin(user): SuperAdmin,
    ApiPath(key): ApiPath<String>,
    ApiJson(payload): ApiJson<SystemSettingRequest>,
) -> ApiResult<JsonResponse<SystemSetting>> {
    Ok(ok(state.settings.set(user.user_id, &key, &payload.value).await?))
}
