//! Login, logout and the current session

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use sales_core::domain::User;
use tracing::info;
use validator::Validate;

use super::{ok, JsonResponse};
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::middleware::{clear_session_cookie, session_cookie, CurrentUser};
use crate::response::Message;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(State(state): State<AppState>, ApiJson(payload): ApiJson<LoginRequest>) -> ApiResult<Response> {
    payload.validate()?;

    let result = state.auth.login(&payload.email, &payload.password).await?;
    let cookie = session_cookie(&result.token, result.expires_in, state.config.jwt.cookie_secure);

    Ok((
        [(header::SET_COOKIE, cookie)],
        ok(LoginResponse {
            user: result.user,
            token: result.token,
            expires_in: result.expires_in,
        }),
    )
        .into_response())
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    info!("Session cookie cleared");
    (
        [(header::SET_COOKIE, clear_session_cookie(state.config.jwt.cookie_secure))],
        ok(Message::new("Logged out")),
    )
        .into_response()
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<JsonResponse<User>> {
    Ok(ok(state.auth.current_user(user.user_id).await?))
}
