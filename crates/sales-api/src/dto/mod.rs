//! Request and response DTOs

pub mod admin;
pub mod auth;
pub mod organization;
pub mod sales;
pub mod settings;

use serde::Deserialize;
use sales_shared::types::Pagination;

/// `?page=&per_page=` with clamping applied.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IncludeInactiveQuery {
    #[serde(default)]
    pub include_inactive: bool,
}
