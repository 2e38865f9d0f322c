//! Tenant admin accounts

use std::sync::Arc;

use sales_security::PasswordService;
use tracing::info;
use uuid::Uuid;

use super::audit_service::AuditService;
use super::TenantScope;
use crate::domain::{AuditAction, User};
use crate::error::DomainError;
use crate::repositories::UserRepository;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    audit: AuditService,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, audit: AuditService) -> Self {
        Self { users, audit }
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<User>, DomainError> {
        self.users.list_by_tenant(tenant_id).await
    }

    pub async fn create(&self, scope: TenantScope, input: NewUser) -> Result<User, DomainError> {
        PasswordService::check_policy(&input.password)?;
        let hash = PasswordService::hash(&input.password)?;
        let user = User::new_admin(scope.tenant_id, input.email, input.name, hash)?;

        if self.users.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }

        let user = self.users.create(&user).await?;
        info!("User {} created in tenant {}", user.id, scope.tenant_id);
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::UserCreate,
                Some(user.id),
                serde_json::json!({ "email": sales_shared::utils::mask_email(&user.email) }),
            )
            .await;
        Ok(user)
    }

    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        if id == scope.user_id {
            return Err(DomainError::validation("You cannot delete your own account"));
        }
        match self.users.find_by_id(id).await? {
            Some(user) if user.tenant_id == Some(scope.tenant_id) => {}
            _ => return Err(DomainError::not_found("User")),
        }

        self.users.delete(scope.tenant_id, id).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::UserDelete,
                Some(id),
                serde_json::json!({}),
            )
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::audit_log_repository::MockAuditLogRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn audit() -> AuditService {
        let mut repo = MockAuditLogRepository::new();
        repo.expect_append().returning(|_| Ok(()));
        AuditService::new(Arc::new(repo))
    }

    fn scope() -> TenantScope {
        TenantScope {
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();
        let service = UserService::new(Arc::new(repo), audit());

        let result = service
            .create(
                scope(),
                NewUser {
                    email: "ito@example.com".to_string(),
                    name: "Ito".to_string(),
                    password: "short".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let scope = scope();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(move |email| {
            Ok(Some(
                User::new_admin(Uuid::new_v4(), email.to_string(), "Other".to_string(), "h".to_string()).unwrap(),
            ))
        });
        repo.expect_create().never();
        let service = UserService::new(Arc::new(repo), audit());

        let result = service
            .create(
                scope,
                NewUser {
                    email: "ito@example.com".to_string(),
                    name: "Ito".to_string(),
                    password: "long-enough-password".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let scope = scope();
        let mut repo = MockUserRepository::new();
        repo.expect_delete().never();
        let service = UserService::new(Arc::new(repo), audit());

        let result = service.delete(scope, scope.user_id).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_cannot_delete_user_of_other_tenant() {
        let scope = scope();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| {
            Ok(Some(
                User::new_admin(Uuid::new_v4(), "x@example.com".to_string(), "X".to_string(), "h".to_string())
                    .unwrap(),
            ))
        });
        repo.expect_delete().never();
        let service = UserService::new(Arc::new(repo), audit());

        let result = service.delete(scope, Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
