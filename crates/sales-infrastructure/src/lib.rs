//! # Sales Infrastructure
//!
//! PostgreSQL repositories, webhook delivery and upload storage (adapters).

pub mod database;
pub mod storage;
pub mod webhook;

pub use database::{
    create_pool, run_migrations, PgAuditLogRepository, PgCustomFieldRepository, PgCustomSlideRepository,
    PgDepartmentRepository, PgDisplayConfigRepository, PgGroupRepository, PgIntegrationRepository,
    PgMemberRepository, PgSalesRecordRepository, PgSystemSettingRepository, PgTargetRepository,
    PgTenantRepository, PgUserRepository,
};
pub use storage::{LocalStorage, StorageError, StoredFile};
pub use webhook::HttpWebhookSender;
