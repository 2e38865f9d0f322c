//! Member (salesperson) domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Member {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Member name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub department_id: Option<Uuid>,

    #[validate(length(max = 2048, message = "Image URL too long"))]
    pub image_url: Option<String>,

    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        tenant_id: Uuid,
        name: String,
        email: Option<String>,
        department_id: Option<Uuid>,
        image_url: Option<String>,
        display_order: i32,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let member = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.trim().to_string(),
            email: normalize_optional(email),
            department_id,
            image_url: normalize_optional(image_url),
            is_active: true,
            display_order,
            created_at: now,
            updated_at: now,
        };

        member.validate()?;
        Ok(member)
    }
}

/// Trim, and treat blank strings as absent.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_member() {
        let member = Member::new(
            Uuid::new_v4(),
            "  Suzuki ".to_string(),
            Some("  ".to_string()),
            None,
            None,
            3,
        )
        .unwrap();
        assert_eq!(member.name, "Suzuki");
        assert!(member.email.is_none());
        assert!(member.is_active);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(Member::new(Uuid::new_v4(), "   ".to_string(), None, None, None, 0).is_err());
    }
}
