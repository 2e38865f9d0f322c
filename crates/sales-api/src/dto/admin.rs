//! Tenants, users and system settings

use serde::Deserialize;
use validator::Validate;

use sales_core::services::{CreateTenant, InitialAdmin, NewUser, UpdateTenant};
use sales_shared::utils::slugify;

#[derive(Debug, Deserialize, Validate)]
pub struct InitialAdminRequest {
    #[validate(email(message = "Invalid admin email"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Admin name must be between 1 and 100 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// Derived from the name when omitted.
    #[serde(default)]
    pub slug: String,
    #[validate(nested)]
    pub admin: Option<InitialAdminRequest>,
}

impl From<CreateTenantRequest> for CreateTenant {
    fn from(req: CreateTenantRequest) -> Self {
        let slug = if req.slug.trim().is_empty() {
            slugify(&req.name)
        } else {
            req.slug
        };
        CreateTenant {
            name: req.name,
            slug,
            admin: req.admin.map(|a| InitialAdmin {
                email: a.email,
                password: a.password,
                name: a.name,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub slug: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<UpdateTenantRequest> for UpdateTenant {
    fn from(req: UpdateTenantRequest) -> Self {
        UpdateTenant {
            name: req.name,
            slug: req.slug,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            email: req.email,
            name: req.name,
            password: req.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SystemSettingRequest {
    pub value: String,
}

pub(crate) fn default_true() -> bool {
    true
}
