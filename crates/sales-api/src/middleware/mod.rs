//! Request middleware and identity extractors

pub mod auth;
pub mod context;

pub use auth::{clear_session_cookie, require_auth, session_cookie, session_token};
pub use context::{CurrentUser, SuperAdmin, TenantContext};
