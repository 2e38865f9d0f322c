//! Shared application state

use std::sync::Arc;

use sales_core::error::DomainError;
use sales_core::repositories::{
    AuditLogRepository, CustomFieldRepository, CustomSlideRepository, DepartmentRepository,
    DisplayConfigRepository, GroupRepository, IntegrationRepository, MemberRepository, SalesRecordRepository,
    SystemSettingRepository, TargetRepository, TenantRepository, UserRepository,
};
use sales_core::services::{
    AuditService, AuthService, CustomFieldService, CustomSlideService, DepartmentService, DisplayService,
    GroupService, IntegrationService, MemberService, ReportService, SalesService, SettingService, TargetService,
    TenantService, UserService,
};
use sales_infrastructure::{
    HttpWebhookSender, LocalStorage, PgAuditLogRepository, PgCustomFieldRepository, PgCustomSlideRepository,
    PgDepartmentRepository, PgDisplayConfigRepository, PgGroupRepository, PgIntegrationRepository,
    PgMemberRepository, PgSalesRecordRepository, PgSystemSettingRepository, PgTargetRepository,
    PgTenantRepository, PgUserRepository,
};
use sales_security::JwtService;
use sales_shared::config::AppConfig;
use sqlx::PgPool;

use crate::events::EventBus;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub events: Arc<EventBus>,
    pub storage: Arc<LocalStorage>,

    pub auth: Arc<AuthService>,
    pub tenants: Arc<TenantService>,
    pub users: Arc<UserService>,
    pub members: Arc<MemberService>,
    pub departments: Arc<DepartmentService>,
    pub groups: Arc<GroupService>,
    pub sales: Arc<SalesService>,
    pub reports: Arc<ReportService>,
    pub targets: Arc<TargetService>,
    pub custom_fields: Arc<CustomFieldService>,
    pub custom_slides: Arc<CustomSlideService>,
    pub display: Arc<DisplayService>,
    pub integrations: Arc<IntegrationService>,
    pub audit: AuditService,
    pub settings: Arc<SettingService>,
}

impl AppState {
    /// Wire the PostgreSQL repositories, webhook sender and storage into services.
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self, DomainError> {
        let tenant_repo: Arc<dyn TenantRepository> = Arc::new(PgTenantRepository::new(db.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db.clone()));
        let member_repo: Arc<dyn MemberRepository> = Arc::new(PgMemberRepository::new(db.clone()));
        let department_repo: Arc<dyn DepartmentRepository> = Arc::new(PgDepartmentRepository::new(db.clone()));
        let group_repo: Arc<dyn GroupRepository> = Arc::new(PgGroupRepository::new(db.clone()));
        let record_repo: Arc<dyn SalesRecordRepository> = Arc::new(PgSalesRecordRepository::new(db.clone()));
        let target_repo: Arc<dyn TargetRepository> = Arc::new(PgTargetRepository::new(db.clone()));
        let field_repo: Arc<dyn CustomFieldRepository> = Arc::new(PgCustomFieldRepository::new(db.clone()));
        let slide_repo: Arc<dyn CustomSlideRepository> = Arc::new(PgCustomSlideRepository::new(db.clone()));
        let display_repo: Arc<dyn DisplayConfigRepository> = Arc::new(PgDisplayConfigRepository::new(db.clone()));
        let integration_repo: Arc<dyn IntegrationRepository> = Arc::new(PgIntegrationRepository::new(db.clone()));
        let audit_repo: Arc<dyn AuditLogRepository> = Arc::new(PgAuditLogRepository::new(db.clone()));
        let setting_repo: Arc<dyn SystemSettingRepository> = Arc::new(PgSystemSettingRepository::new(db.clone()));

        let amount_unit = config.sales.amount_unit;
        let jwt = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expiry_seconds));
        let events = Arc::new(EventBus::new(config.sales.event_capacity));
        let storage = Arc::new(LocalStorage::new(&config.storage));
        let audit = AuditService::new(audit_repo);

        let integrations = Arc::new(IntegrationService::new(
            integration_repo,
            Arc::new(HttpWebhookSender::new(&config.webhook)?),
            audit.clone(),
        ));

        Ok(Self {
            auth: Arc::new(AuthService::new(user_repo.clone(), tenant_repo.clone(), jwt, audit.clone())),
            tenants: Arc::new(TenantService::new(
                tenant_repo,
                user_repo.clone(),
                display_repo.clone(),
                audit.clone(),
            )),
            users: Arc::new(UserService::new(user_repo, audit.clone())),
            members: Arc::new(MemberService::new(member_repo.clone(), department_repo.clone(), audit.clone())),
            departments: Arc::new(DepartmentService::new(department_repo, audit.clone())),
            groups: Arc::new(GroupService::new(group_repo.clone(), member_repo.clone(), audit.clone())),
            sales: Arc::new(SalesService::new(
                record_repo.clone(),
                member_repo.clone(),
                field_repo.clone(),
                integrations.clone(),
                events.clone(),
                audit.clone(),
                amount_unit,
            )),
            reports: Arc::new(ReportService::new(
                record_repo,
                member_repo.clone(),
                group_repo,
                target_repo.clone(),
                amount_unit,
            )),
            targets: Arc::new(TargetService::new(target_repo, member_repo, audit.clone())),
            custom_fields: Arc::new(CustomFieldService::new(field_repo, audit.clone())),
            custom_slides: Arc::new(CustomSlideService::new(slide_repo.clone(), audit.clone())),
            display: Arc::new(DisplayService::new(display_repo, slide_repo, audit.clone())),
            integrations,
            settings: Arc::new(SettingService::new(setting_repo, audit.clone())),
            audit,
            events,
            storage,
            config: Arc::new(config),
            db,
        })
    }
}
