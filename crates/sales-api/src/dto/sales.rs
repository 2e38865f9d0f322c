//! Sales entry, import, listing and report parameters

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sales_core::domain::{Period, SalesFilter, YearMonth};
use sales_core::services::{DashboardQuery, ImportRow, ReportQuery, SaleInput};
use sales_shared::types::Pagination;

use crate::error::ApiError;

pub const MAX_IMPORT_ROWS: usize = 1000;
const DEFAULT_REPORT_MONTHS: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct SaleRequest {
    pub member_id: Uuid,
    pub amount: i64,
    pub sale_date: NaiveDate,
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

impl From<SaleRequest> for SaleInput {
    fn from(req: SaleRequest) -> Self {
        SaleInput {
            member_id: req.member_id,
            amount: req.amount,
            sale_date: req.sale_date,
            description: req.description,
            custom_fields: req.custom_fields,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportRowRequest {
    pub member_id: Option<Uuid>,
    pub member_name: Option<String>,
    pub amount: i64,
    pub sale_date: String,
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub rows: Vec<ImportRowRequest>,
}

impl ImportRequest {
    pub fn into_rows(self) -> Result<Vec<ImportRow>, ApiError> {
        if self.rows.is_empty() {
            return Err(ApiError::BadRequest("No rows to import".to_string()));
        }
        if self.rows.len() > MAX_IMPORT_ROWS {
            return Err(ApiError::BadRequest(format!(
                "At most {} rows can be imported at once",
                MAX_IMPORT_ROWS
            )));
        }
        Ok(self
            .rows
            .into_iter()
            .map(|r| ImportRow {
                member_id: r.member_id,
                member_name: r.member_name,
                amount: r.amount,
                sale_date: r.sale_date,
                description: r.description,
                custom_fields: r.custom_fields,
            })
            .collect())
    }
}

/// Filters shared by the record list and the CSV export.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub member_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl RecordQuery {
    pub fn filter(&self) -> SalesFilter {
        SalesFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            member_ids: self.member_id.map(|id| vec![id]),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub period: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub group_id: Option<Uuid>,
}

impl DashboardParams {
    /// Missing year/month default to the month containing `today`.
    pub fn into_query(self, today: NaiveDate) -> Result<DashboardQuery, ApiError> {
        let period = match self.period.as_deref() {
            None | Some("") => Period::Monthly,
            Some(raw) => Period::from_str(raw)
                .ok_or_else(|| ApiError::BadRequest("period must be monthly, quarterly or annual".to_string()))?,
        };
        let anchor = YearMonth::new(
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )?;
        Ok(DashboardQuery {
            period,
            anchor,
            group_id: self.group_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// `YYYY-MM`
    pub start_month: Option<String>,
    /// `YYYY-MM`
    pub end_month: Option<String>,
    pub member_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
}

impl ReportParams {
    /// Defaults to the twelve months ending with the month of `today`.
    pub fn into_query(self, today: NaiveDate) -> Result<ReportQuery, ApiError> {
        let end = match self.end_month.as_deref() {
            Some(raw) => parse_year_month(raw)?,
            None => YearMonth::of(today),
        };
        let start = match self.start_month.as_deref() {
            Some(raw) => parse_year_month(raw)?,
            None => months_before(end, DEFAULT_REPORT_MONTHS - 1),
        };
        Ok(ReportQuery {
            start,
            end,
            member_id: self.member_id,
            group_id: self.group_id,
        })
    }
}

pub fn parse_year_month(raw: &str) -> Result<YearMonth, ApiError> {
    let invalid = || ApiError::BadRequest(format!("Invalid month '{}', expected YYYY-MM", raw));
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    YearMonth::new(year, month).map_err(|_| invalid())
}

fn months_before(month: YearMonth, count: u32) -> YearMonth {
    let index = month.year * 12 + month.month as i32 - 1 - count as i32;
    YearMonth {
        year: index.div_euclid(12),
        month: index.rem_euclid(12) as u32 + 1,
    }
}

#[derive(Debug, Serialize)]
pub struct StreamHello {
    pub tenant_id: Uuid,
}
