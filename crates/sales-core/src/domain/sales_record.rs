//! Sales record domain entity

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::normalize_optional;
use crate::error::DomainError;

pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// A single sale. `amount` is in the base currency unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub amount: i64,
    pub sale_date: NaiveDate,
    pub description: Option<String>,
    /// Custom field values keyed by custom field id.
    pub custom_fields: BTreeMap<String, String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SalesRecord {
    pub fn new(
        tenant_id: Uuid,
        member_id: Uuid,
        amount: i64,
        sale_date: NaiveDate,
        description: Option<String>,
        custom_fields: BTreeMap<String, String>,
        created_by: Option<Uuid>,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let record = Self {
            id: Uuid::new_v4(),
            tenant_id,
            member_id,
            amount,
            sale_date,
            description: normalize_optional(description),
            custom_fields,
            created_by,
            created_at: now,
            updated_at: now,
        };

        record.check()?;
        Ok(record)
    }

    pub fn check(&self) -> Result<(), DomainError> {
        if self.amount <= 0 {
            return Err(DomainError::validation("Amount must be greater than zero"));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(DomainError::validation(format!(
                    "Description must be at most {} characters",
                    MAX_DESCRIPTION_LENGTH
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesRecordWithMember {
    #[serde(flatten)]
    pub record: SalesRecord,
    pub member_name: String,
}

/// Filter for listing records. Dates are inclusive.
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub member_ids: Option<Vec<Uuid>>,
}

impl SalesFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            member_ids: None,
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(DomainError::validation("start_date must not be after end_date"));
            }
        }
        Ok(())
    }
}
