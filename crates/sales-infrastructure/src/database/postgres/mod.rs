//! PostgreSQL repository implementations

pub mod audit_log_repo_impl;
pub mod custom_field_repo_impl;
pub mod custom_slide_repo_impl;
pub mod department_repo_impl;
pub mod display_config_repo_impl;
pub mod group_repo_impl;
pub mod integration_repo_impl;
pub mod member_repo_impl;
pub mod sales_record_repo_impl;
pub mod system_setting_repo_impl;
pub mod target_repo_impl;
pub mod tenant_repo_impl;
pub mod user_repo_impl;

pub use audit_log_repo_impl::PgAuditLogRepository;
pub use custom_field_repo_impl::PgCustomFieldRepository;
pub use custom_slide_repo_impl::PgCustomSlideRepository;
pub use department_repo_impl::PgDepartmentRepository;
pub use display_config_repo_impl::PgDisplayConfigRepository;
pub use group_repo_impl::PgGroupRepository;
pub use integration_repo_impl::PgIntegrationRepository;
pub use member_repo_impl::PgMemberRepository;
pub use sales_record_repo_impl::PgSalesRecordRepository;
pub use system_setting_repo_impl::PgSystemSettingRepository;
pub use target_repo_impl::PgTargetRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use user_repo_impl::PgUserRepository;

use sales_core::DomainError;
use tracing::error;

const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error to a domain error, logging it. Unique violations
/// become `Conflict` with `conflict` as the message.
pub(crate) fn map_db_error<'a>(context: &'a str, conflict: &str) -> impl FnOnce(sqlx::Error) -> DomainError + 'a {
    let conflict = conflict.to_string();
    move |e: sqlx::Error| {
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return DomainError::Conflict(conflict);
            }
        }
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Plain mapping for queries that cannot hit a unique constraint.
pub(crate) fn db_error(context: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// `NotFound` when a mutating statement touched no rows.
pub(crate) fn expect_affected(rows: u64, entity: &str) -> Result<(), DomainError> {
    if rows == 0 {
        Err(DomainError::not_found(entity))
    } else {
        Ok(())
    }
}
