//! HTTP handlers, one module per resource

pub mod audit;
pub mod auth;
pub mod custom_fields;
pub mod custom_slides;
pub mod departments;
pub mod display;
pub mod groups;
pub mod health;
pub mod integrations;
pub mod members;
pub mod sales;
pub mod system_settings;
pub mod targets;
pub mod tenants;
pub mod upload;
pub mod users;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::response::ApiResponse;

pub type JsonResponse<T> = Json<ApiResponse<T>>;

pub(crate) fn ok<T: Serialize>(data: T) -> JsonResponse<T> {
    Json(ApiResponse::success(data))
}

pub(crate) fn created<T: Serialize>(data: T) -> (StatusCode, JsonResponse<T>) {
    (StatusCode::CREATED, ok(data))
}
