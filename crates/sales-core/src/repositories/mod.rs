//! Repository traits (ports)
//!
//! Every tenant-owned method takes the tenant id explicitly.

pub mod audit_log_repository;
pub mod custom_field_repository;
pub mod custom_slide_repository;
pub mod department_repository;
pub mod display_config_repository;
pub mod group_repository;
pub mod integration_repository;
pub mod member_repository;
pub mod sales_record_repository;
pub mod system_setting_repository;
pub mod target_repository;
pub mod tenant_repository;
pub mod user_repository;

pub use audit_log_repository::AuditLogRepository;
pub use custom_field_repository::CustomFieldRepository;
pub use custom_slide_repository::CustomSlideRepository;
pub use department_repository::DepartmentRepository;
pub use display_config_repository::DisplayConfigRepository;
pub use group_repository::GroupRepository;
pub use integration_repository::IntegrationRepository;
pub use member_repository::MemberRepository;
pub use sales_record_repository::SalesRecordRepository;
pub use system_setting_repository::SystemSettingRepository;
pub use target_repository::TargetRepository;
pub use tenant_repository::TenantRepository;
pub use user_repository::UserRepository;

