//! Group domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::member::normalize_optional;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Group {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Group name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(
        tenant_id: Uuid,
        name: String,
        description: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let group = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.trim().to_string(),
            description: normalize_optional(description),
            created_at: now,
            updated_at: now,
        };

        group.validate()?;
        Ok(group)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupWithMembers {
    #[serde(flatten)]
    pub group: Group,
    pub member_ids: Vec<Uuid>,
}
