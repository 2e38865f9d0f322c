//! # Sales Core
//!
//! Domain entities, repository ports, services and report aggregation for
//! the sales dashboard. Every tenant-owned operation takes the tenant id
//! explicitly; there is no ambient tenant filter.

pub mod domain;
pub mod error;
pub mod report;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
