//! Domain services (business logic)

pub mod audit_service;
pub mod auth_service;
pub mod custom_field_service;
pub mod custom_slide_service;
pub mod department_service;
pub mod display_service;
pub mod events;
pub mod group_service;
pub mod integration_service;
pub mod member_service;
pub mod report_service;
pub mod sales_service;
pub mod setting_service;
pub mod target_service;
pub mod tenant_service;
pub mod user_service;

pub use audit_service::AuditService;
pub use auth_service::{ensure_super_admin, AuthService, AuthUser, LoginResult};
pub use custom_field_service::{CustomFieldInput, CustomFieldService};
pub use custom_slide_service::CustomSlideService;
pub use department_service::DepartmentService;
pub use display_service::{DisplayConfigInput, DisplayService};
pub use events::{SalesEvent, SalesEventPublisher};
pub use group_service::{GroupInput, GroupService};
pub use integration_service::{IntegrationService, SaleNotification, WebhookSender};
pub use member_service::{MemberInput, MemberService};
pub use report_service::{DashboardQuery, ReportQuery, ReportService};
pub use sales_service::{
    ExportData, ImportRow, ImportRowResult, ImportSummary, ResolvedFieldValue, SaleInput, SalesRecordView,
    SalesService,
};
pub use setting_service::SettingService;
pub use target_service::{MemberTarget, TargetInput, TargetService};
pub use tenant_service::{CreateTenant, InitialAdmin, TenantService, UpdateTenant};
pub use user_service::{NewUser, UserService};

use uuid::Uuid;

/// Tenant a request operates on and the user performing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
}
