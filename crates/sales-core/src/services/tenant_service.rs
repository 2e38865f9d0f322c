//! Tenant provisioning and management (super admin only)

use std::sync::Arc;

use sales_security::PasswordService;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::audit_service::AuditService;
use crate::domain::{AuditAction, DisplayConfig, Tenant, User};
use crate::error::DomainError;
use crate::repositories::{DisplayConfigRepository, TenantRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct InitialAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateTenant {
    pub name: String,
    pub slug: String,
    pub admin: Option<InitialAdmin>,
}

#[derive(Debug, Clone)]
pub struct UpdateTenant {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
    display_configs: Arc<dyn DisplayConfigRepository>,
    audit: AuditService,
}

impl TenantService {
    pub fn new(
        tenants: Arc<dyn TenantRepository>,
        users: Arc<dyn UserRepository>,
        display_configs: Arc<dyn DisplayConfigRepository>,
        audit: AuditService,
    ) -> Self {
        Self {
            tenants,
            users,
            display_configs,
            audit,
        }
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        self.tenants.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Tenant, DomainError> {
        self.tenants
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tenant"))
    }

    /// Create a tenant, its default display settings and optionally its
    /// first admin account.
    pub async fn create(&self, actor: Uuid, input: CreateTenant) -> Result<Tenant, DomainError> {
        let tenant = Tenant::new(input.name, input.slug)?;
        if self.tenants.find_by_slug(&tenant.slug).await?.is_some() {
            warn!("Tenant creation rejected: slug {} taken", tenant.slug);
            return Err(DomainError::Conflict("duplicate slug".to_string()));
        }

        // Everything about the admin is checked before anything is written.
        let admin = match input.admin {
            Some(admin) => {
                PasswordService::check_policy(&admin.password)?;
                let hash = PasswordService::hash(&admin.password)?;
                let user = User::new_admin(tenant.id, admin.email, admin.name, hash)?;
                if self.users.find_by_email(&user.email).await?.is_some() {
                    return Err(DomainError::Conflict("Email already registered".to_string()));
                }
                Some(user)
            }
            None => None,
        };

        let tenant = self.tenants.create(&tenant).await?;
        if let Err(e) = self.provision(&tenant, admin.as_ref()).await {
            warn!("Provisioning tenant {} failed, removing it: {}", tenant.slug, e);
            // Deleting the tenant cascades to whatever was written for it.
            if let Err(cleanup) = self.tenants.delete(tenant.id).await {
                error!("Failed to remove half-created tenant {}: {}", tenant.id, cleanup);
            }
            return Err(e);
        }

        info!("Tenant {} ({}) created", tenant.slug, tenant.id);
        self.audit
            .record(
                Some(tenant.id),
                Some(actor),
                AuditAction::TenantCreate,
                Some(tenant.id),
                serde_json::json!({ "slug": tenant.slug, "with_admin": admin.is_some() }),
            )
            .await;
        Ok(tenant)
    }

    async fn provision(&self, tenant: &Tenant, admin: Option<&User>) -> Result<(), DomainError> {
        self.display_configs
            .replace(&DisplayConfig::default_for(tenant.id))
            .await?;
        if let Some(user) = admin {
            self.users.create(user).await?;
        }
        Ok(())
    }

    pub async fn update(&self, actor: Uuid, id: Uuid, input: UpdateTenant) -> Result<Tenant, DomainError> {
        let mut tenant = self.get(id).await?;
        tenant.rename(input.name, input.slug)?;
        tenant.is_active = input.is_active;

        if let Some(existing) = self.tenants.find_by_slug(&tenant.slug).await? {
            if existing.id != id {
                return Err(DomainError::Conflict("duplicate slug".to_string()));
            }
        }

        let tenant = self.tenants.update(&tenant).await?;
        self.audit
            .record(
                Some(id),
                Some(actor),
                AuditAction::TenantUpdate,
                Some(id),
                serde_json::json!({ "slug": tenant.slug, "is_active": tenant.is_active }),
            )
            .await;
        Ok(tenant)
    }

    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        let tenant = self.get(id).await?;
        self.tenants.delete(id).await?;
        info!("Tenant {} ({}) deleted", tenant.slug, id);
        self.audit
            .record(
                None,
                Some(actor),
                AuditAction::TenantDelete,
                Some(id),
                serde_json::json!({ "slug": tenant.slug }),
            )
            .await;
        Ok(())
    }
}
