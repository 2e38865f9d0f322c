//! Authentication service: credential login, session validation and
//! super-admin bootstrap

use std::sync::Arc;

use sales_security::{JwtError, JwtService, PasswordService};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::audit_service::AuditService;
use crate::domain::{AuditAction, Role, User};
use crate::error::DomainError;
use crate::repositories::{TenantRepository, UserRepository};

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
}

impl AuthUser {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tenants: Arc<dyn TenantRepository>,
    jwt: Arc<JwtService>,
    audit: AuditService,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        jwt: Arc<JwtService>,
        audit: AuditService,
    ) -> Self {
        Self { users, tenants, jwt, audit }
    }

    /// Tenant admins can only sign in while their tenant is active.
    async fn tenant_is_active(&self, user: &User) -> Result<bool, DomainError> {
        match user.tenant_id {
            None => Ok(true),
            Some(tenant_id) => Ok(self
                .tenants
                .find_by_id(tenant_id)
                .await?
                .is_some_and(|tenant| tenant.is_active)),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let email = email.trim().to_lowercase();
        info!("Login attempt for {}", sales_shared::utils::mask_email(&email));

        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login failed: unknown email");
            DomainError::InvalidCredentials
        })?;

        if !user.can_login() {
            warn!("Login failed: user {} is inactive", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        let valid = PasswordService::verify(password, &user.password_hash).map_err(|e| {
            error!("Stored hash for user {} is unreadable: {}", user.id, e);
            DomainError::InvalidCredentials
        })?;
        if !valid {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        if !self.tenant_is_active(&user).await? {
            warn!("Login failed: tenant of user {} is inactive", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .jwt
            .generate_token(user.id, user.tenant_id, user.role.as_str())
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        let mut updated = user.clone();
        updated.record_login();
        let user = match self.users.update(&updated).await {
            Ok(saved) => saved,
            Err(e) => {
                error!("Failed to record last login for {}: {}", user.id, e);
                user
            }
        };

        self.audit
            .record(user.tenant_id, Some(user.id), AuditAction::Login, Some(user.id), serde_json::json!({}))
            .await;
        info!("Login successful for user {}", user.id);

        Ok(LoginResult {
            user,
            token,
            expires_in: self.jwt.expiry_seconds(),
        })
    }

    /// Validate a session token and make sure its user still exists and is
    /// active.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, DomainError> {
        let claims = self.jwt.validate_token(token).map_err(|e| match e {
            JwtError::TokenExpired => DomainError::Unauthorized("Session expired".to_string()),
            _ => DomainError::Unauthorized("Invalid session".to_string()),
        })?;

        let user = self.current_user(claims.sub).await?;
        Ok(AuthUser {
            user_id: user.id,
            tenant_id: user.tenant_id,
            role: user.role,
        })
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        let user = match self.users.find_by_id(user_id).await? {
            Some(user) if user.can_login() => user,
            _ => return Err(DomainError::Unauthorized("User no longer active".to_string())),
        };
        if !self.tenant_is_active(&user).await? {
            warn!("Rejected session of user {}: tenant is inactive", user.id);
            return Err(DomainError::Unauthorized("Tenant is inactive".to_string()));
        }
        Ok(user)
    }

    /// Create the first super admin when none exists. Returns whether one
    /// was created.
    pub async fn bootstrap_super_admin(&self, email: &str, password: &str) -> Result<bool, DomainError> {
        if self.users.exists_super_admin().await? {
            return Ok(false);
        }
        PasswordService::check_policy(password)?;
        let hash = PasswordService::hash(password)?;
        let user = User::new_super_admin(email.to_string(), "Super Admin".to_string(), hash)?;
        self.users.create(&user).await?;
        info!("Bootstrapped super admin {}", sales_shared::utils::mask_email(&user.email));
        Ok(true)
    }
}

pub fn ensure_super_admin(user: &AuthUser) -> Result<(), DomainError> {
    if user.is_super_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden("Super admin only".to_string()))
    }
}
