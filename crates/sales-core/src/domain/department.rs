//! Department domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Department {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Department name must be between 1 and 100 characters"))]
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    pub fn new(tenant_id: Uuid, name: String) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let department = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        department.validate()?;
        Ok(department)
    }
}
