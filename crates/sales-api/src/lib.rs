//! # Sales API
//!
//! HTTP handlers, middleware, DTOs, the live event bus and router assembly.

pub mod csv;
pub mod dto;
pub mod error;
pub mod events;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use events::EventBus;
pub use routes::build_router;
pub use state::AppState;
