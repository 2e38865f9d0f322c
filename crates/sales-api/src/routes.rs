//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sales_shared::constants::TENANT_HEADER;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers;
use crate::middleware::require_auth;
use crate::state::AppState;

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout));

    // Everything else needs a session
    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/tenants",
            get(handlers::tenants::list).post(handlers::tenants::create),
        )
        .route(
            "/api/tenants/{id}",
            get(handlers::tenants::get)
                .put(handlers::tenants::update)
                .delete(handlers::tenants::delete),
        )
        .route("/api/users", get(handlers::users::list).post(handlers::users::create))
        .route("/api/users/{id}", delete(handlers::users::delete))
        .route(
            "/api/members",
            get(handlers::members::list).post(handlers::members::create),
        )
        .route(
            "/api/members/{id}",
            get(handlers::members::get)
                .put(handlers::members::update)
                .delete(handlers::members::delete),
        )
        .route(
            "/api/departments",
            get(handlers::departments::list).post(handlers::departments::create),
        )
        .route(
            "/api/departments/{id}",
            put(handlers::departments::update).delete(handlers::departments::delete),
        )
        .route("/api/groups", get(handlers::groups::list).post(handlers::groups::create))
        .route(
            "/api/groups/{id}",
            get(handlers::groups::get)
                .put(handlers::groups::update)
                .delete(handlers::groups::delete),
        )
        .route(
            "/api/groups/{id}/members",
            get(handlers::groups::members).put(handlers::groups::sync_members),
        )
        .route("/api/sales", get(handlers::sales::dashboard).post(handlers::sales::create))
        .route("/api/sales/import", post(handlers::sales::import))
        .route("/api/sales/records", get(handlers::sales::list_records))
        .route("/api/sales/records/export", get(handlers::sales::export))
        .route(
            "/api/sales/records/{id}",
            get(handlers::sales::get_record)
                .put(handlers::sales::update_record)
                .delete(handlers::sales::delete_record),
        )
        .route("/api/sales/report", get(handlers::sales::report))
        .route("/api/sales/stream", get(handlers::sales::stream))
        .route("/api/targets", get(handlers::targets::list).put(handlers::targets::upsert))
        .route(
            "/api/custom-fields",
            get(handlers::custom_fields::list).post(handlers::custom_fields::create),
        )
        .route(
            "/api/custom-fields/{id}",
            put(handlers::custom_fields::update).delete(handlers::custom_fields::delete),
        )
        .route(
            "/api/custom-slides",
            get(handlers::custom_slides::list).post(handlers::custom_slides::create),
        )
        .route(
            "/api/custom-slides/{id}",
            put(handlers::custom_slides::update).delete(handlers::custom_slides::delete),
        )
        .route(
            "/api/settings/display",
            get(handlers::display::get).put(handlers::display::update),
        )
        .route("/api/settings/system", get(handlers::system_settings::list))
        .route(
            "/api/settings/system/{key}",
            get(handlers::system_settings::get).put(handlers::system_settings::set),
        )
        .route(
            "/api/integrations",
            get(handlers::integrations::list).put(handlers::integrations::upsert),
        )
        .route(
            "/api/integrations/{id}",
            delete(handlers::integrations::delete),
        )
        .route("/api/integrations/{id}/test", post(handlers::integrations::test))
        .route("/api/audit-logs", get(handlers::audit::list))
        .route("/api/upload", post(handlers::upload::upload))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let body_limit = state.config.storage.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    let uploads = ServeDir::new(state.storage.root());
    let cors = cors_layer(&state.config.app.cors_origins);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/uploads", uploads)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true)))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Explicit origins may send the session cookie cross-origin. With none
/// configured only same-origin requests are served.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(TENANT_HEADER),
        ])
        .allow_credentials(true)
}
