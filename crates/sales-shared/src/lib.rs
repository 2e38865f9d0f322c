//! # Sales Shared
//!
//! Configuration, telemetry, constants and common types shared by the
//! sales dashboard crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::AppError;
pub use types::*;
