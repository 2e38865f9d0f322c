//! Calendar periods used by targets, dashboards and reports

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    #[default]
    Monthly,
    Quarterly,
    Annual,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Monthly => "MONTHLY",
            Period::Quarterly => "QUARTERLY",
            Period::Annual => "ANNUAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MONTHLY" => Some(Period::Monthly),
            "QUARTERLY" => Some(Period::Quarterly),
            "ANNUAL" => Some(Period::Annual),
            _ => None,
        }
    }

    /// Months covered by this period around `anchor`. Quarters are calendar
    /// quarters; years start in January.
    pub fn months(&self, anchor: YearMonth) -> Vec<YearMonth> {
        let (start, count) = match self {
            Period::Monthly => (anchor, 1),
            Period::Quarterly => (anchor.quarter_start(), 3),
            Period::Annual => (YearMonth { year: anchor.year, month: 1 }, 12),
        };
        std::iter::successors(Some(start), |ym| Some(ym.next()))
            .take(count)
            .collect()
    }

    pub fn range(&self, anchor: YearMonth) -> DateRange {
        let months = self.months(anchor);
        // months() is never empty
        let first = months[0];
        let last = months[months.len() - 1];
        DateRange {
            start: first.first_day(),
            end: last.last_day(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!("Month must be 1-12, got {}", month)));
        }
        if !(1970..=9999).contains(&year) {
            return Err(DomainError::validation(format!("Year out of range: {}", year)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn quarter_start(&self) -> Self {
        Self {
            year: self.year,
            month: ((self.month - 1) / 3) * 3 + 1,
        }
    }

    /// Inclusive month sequence from `self` to `end`; empty when `end` precedes `self`.
    pub fn through(&self, end: YearMonth) -> Vec<YearMonth> {
        std::iter::successors(Some(*self), |ym| Some(ym.next()))
            .take_while(|ym| *ym <= end)
            .collect()
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
