//! Who is calling, and on which tenant's data

use axum::{extract::FromRequestParts, http::request::Parts};
use sales_core::domain::{Role, Tenant};
use sales_core::services::{ensure_super_admin, AuthUser, TenantScope};
use sales_shared::constants::TENANT_HEADER;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

fn auth_user(parts: &Parts) -> Result<AuthUser, ApiError> {
    parts
        .extensions
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
}

/// The authenticated caller.
pub struct CurrentUser(pub AuthUser);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        auth_user(parts).map(CurrentUser)
    }
}

/// The caller, required to be a super admin (403 otherwise).
pub struct SuperAdmin(pub AuthUser);

impl<S: Send + Sync> FromRequestParts<S> for SuperAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = auth_user(parts)?;
        ensure_super_admin(&user)?;
        Ok(SuperAdmin(user))
    }
}

/// Tenant the request operates on. Admins are bound to their own tenant;
/// super admins pick one with the `X-Tenant-Id` header. Inactive tenants
/// are refused either way; an admin's session is already rejected at
/// authentication.
pub struct TenantContext {
    pub scope: TenantScope,
    pub user: AuthUser,
}

impl TenantContext {
    pub fn tenant_id(&self) -> Uuid {
        self.scope.tenant_id
    }
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = auth_user(parts)?;

        let tenant_id = match user.role {
            Role::Admin => user
                .tenant_id
                .ok_or_else(|| ApiError::Forbidden("Account is not bound to a tenant".to_string()))?,
            Role::SuperAdmin => {
                let id = requested_tenant(parts)?;
                // 404 for an unknown tenant rather than silently empty results.
                let tenant = state.tenants.get(id).await?;
                ensure_active(&tenant)?;
                id
            }
        };

        Ok(TenantContext {
            scope: TenantScope {
                tenant_id,
                user_id: user.user_id,
            },
            user,
        })
    }
}

fn ensure_active(tenant: &Tenant) -> Result<(), ApiError> {
    if tenant.is_active {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Tenant is inactive".to_string()))
    }
}

fn requested_tenant(parts: &Parts) -> Result<Uuid, ApiError> {
    let raw = parts
        .headers
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} header is required", TENANT_HEADER)))?;

    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("{} must be a UUID", TENANT_HEADER)))
}
