//! Append-only audit trail

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Login,
    TenantCreate,
    TenantUpdate,
    TenantDelete,
    UserCreate,
    UserDelete,
    MemberCreate,
    MemberUpdate,
    MemberDelete,
    DepartmentCreate,
    DepartmentUpdate,
    DepartmentDelete,
    GroupCreate,
    GroupUpdate,
    GroupDelete,
    GroupMembersSync,
    SalesCreate,
    SalesImport,
    SalesUpdate,
    SalesDelete,
    TargetUpsert,
    CustomFieldCreate,
    CustomFieldUpdate,
    CustomFieldDelete,
    CustomSlideCreate,
    CustomSlideUpdate,
    CustomSlideDelete,
    DisplayConfigUpdate,
    IntegrationUpsert,
    IntegrationDelete,
    SystemSettingUpdate,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "LOGIN",
            AuditAction::TenantCreate => "TENANT_CREATE",
            AuditAction::TenantUpdate => "TENANT_UPDATE",
            AuditAction::TenantDelete => "TENANT_DELETE",
            AuditAction::UserCreate => "USER_CREATE",
            AuditAction::UserDelete => "USER_DELETE",
            AuditAction::MemberCreate => "MEMBER_CREATE",
            AuditAction::MemberUpdate => "MEMBER_UPDATE",
            AuditAction::MemberDelete => "MEMBER_DELETE",
            AuditAction::DepartmentCreate => "DEPARTMENT_CREATE",
            AuditAction::DepartmentUpdate => "DEPARTMENT_UPDATE",
            AuditAction::DepartmentDelete => "DEPARTMENT_DELETE",
            AuditAction::GroupCreate => "GROUP_CREATE",
            AuditAction::GroupUpdate => "GROUP_UPDATE",
            AuditAction::GroupDelete => "GROUP_DELETE",
            AuditAction::GroupMembersSync => "GROUP_MEMBERS_SYNC",
            AuditAction::SalesCreate => "SALES_CREATE",
            AuditAction::SalesImport => "SALES_IMPORT",
            AuditAction::SalesUpdate => "SALES_UPDATE",
            AuditAction::SalesDelete => "SALES_DELETE",
            AuditAction::TargetUpsert => "TARGET_UPSERT",
            AuditAction::CustomFieldCreate => "CUSTOM_FIELD_CREATE",
            AuditAction::CustomFieldUpdate => "CUSTOM_FIELD_UPDATE",
            AuditAction::CustomFieldDelete => "CUSTOM_FIELD_DELETE",
            AuditAction::CustomSlideCreate => "CUSTOM_SLIDE_CREATE",
            AuditAction::CustomSlideUpdate => "CUSTOM_SLIDE_UPDATE",
            AuditAction::CustomSlideDelete => "CUSTOM_SLIDE_DELETE",
            AuditAction::DisplayConfigUpdate => "DISPLAY_CONFIG_UPDATE",
            AuditAction::IntegrationUpsert => "INTEGRATION_UPSERT",
            AuditAction::IntegrationDelete => "INTEGRATION_DELETE",
            AuditAction::SystemSettingUpdate => "SYSTEM_SETTING_UPDATE",
        }
    }

    /// Entity type recorded alongside the action.
    pub fn entity_type(&self) -> &'static str {
        match self {
            AuditAction::Login | AuditAction::UserCreate | AuditAction::UserDelete => "user",
            AuditAction::TenantCreate | AuditAction::TenantUpdate | AuditAction::TenantDelete => "tenant",
            AuditAction::MemberCreate | AuditAction::MemberUpdate | AuditAction::MemberDelete => "member",
            AuditAction::DepartmentCreate | AuditAction::DepartmentUpdate | AuditAction::DepartmentDelete => {
                "department"
            }
            AuditAction::GroupCreate
            | AuditAction::GroupUpdate
            | AuditAction::GroupDelete
            | AuditAction::GroupMembersSync => "group",
            AuditAction::SalesCreate
            | AuditAction::SalesImport
            | AuditAction::SalesUpdate
            | AuditAction::SalesDelete => "sales_record",
            AuditAction::TargetUpsert => "target",
            AuditAction::CustomFieldCreate | AuditAction::CustomFieldUpdate | AuditAction::CustomFieldDelete => {
                "custom_field"
            }
            AuditAction::CustomSlideCreate | AuditAction::CustomSlideUpdate | AuditAction::CustomSlideDelete => {
                "custom_slide"
            }
            AuditAction::DisplayConfigUpdate => "display_config",
            AuditAction::IntegrationUpsert | AuditAction::IntegrationDelete => "integration",
            AuditAction::SystemSettingUpdate => "system_setting",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(
        tenant_id: Option<Uuid>,
        user_id: Option<Uuid>,
        action: AuditAction,
        entity_id: Option<Uuid>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            user_id,
            action: action.as_str().to_string(),
            entity_type: action.entity_type().to_string(),
            entity_id,
            details,
            created_at: Utc::now(),
        }
    }
}
