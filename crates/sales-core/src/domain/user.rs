//! User (login account) domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,
    /// `None` only for super admins.
    pub tenant_id: Option<Uuid>,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new_admin(
        tenant_id: Uuid,
        email: String,
        name: String,
        password_hash: String,
    ) -> Result<Self, validator::ValidationErrors> {
        Self::build(Some(tenant_id), email, name, password_hash, Role::Admin)
    }

    pub fn new_super_admin(
        email: String,
        name: String,
        password_hash: String,
    ) -> Result<Self, validator::ValidationErrors> {
        Self::build(None, email, name, password_hash, Role::SuperAdmin)
    }

    fn build(
        tenant_id: Option<Uuid>,
        email: String,
        name: String,
        password_hash: String,
        role: Role,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: Uuid::new_v4(),
            tenant_id,
            email: email.trim().to_lowercase(),
            name: name.trim().to_string(),
            password_hash,
            role,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::SuperAdmin, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("MEMBER"), None);
    }

    #[test]
    fn test_new_admin_normalizes_email() {
        let user = User::new_admin(
            Uuid::new_v4(),
            " Sato@Example.COM ".to_string(),
            "Sato".to_string(),
            "hash".to_string(),
        )
        .unwrap();
        assert_eq!(user.email, "sato@example.com");
        assert_eq!(user.role, Role::Admin);
        assert!(user.can_login());
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(User::new_super_admin("nope".to_string(), "Root".to_string(), "h".to_string()).is_err());
    }
}
