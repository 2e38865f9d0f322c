//! Tenant domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Tenant {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Tenant name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(
        length(min = 2, max = 100, message = "Slug must be between 2 and 100 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');
    if valid {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("slug");
        err.message = Some("Slug may only contain lowercase letters, digits and inner dashes".into());
        Err(err)
    }
}

impl Tenant {
    pub fn new(name: String, slug: String) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let tenant = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            slug: slug.trim().to_lowercase(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        tenant.validate()?;
        Ok(tenant)
    }

    pub fn rename(&mut self, name: String, slug: String) -> Result<(), validator::ValidationErrors> {
        self.name = name.trim().to_string();
        self.slug = slug.trim().to_lowercase();
        self.updated_at = Utc::now();
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tenant() {
        let tenant = Tenant::new(" Acme Sales ".to_string(), "Acme-Sales".to_string()).unwrap();
        assert_eq!(tenant.name, "Acme Sales");
        assert_eq!(tenant.slug, "acme-sales");
        assert!(tenant.is_active);
    }

    #[test]
    fn test_invalid_slug() {
        assert!(Tenant::new("Acme".to_string(), "acme sales".to_string()).is_err());
        assert!(Tenant::new("Acme".to_string(), "-acme".to_string()).is_err());
        assert!(Tenant::new("Acme".to_string(), "a".to_string()).is_err());
    }
}
