//! # Sales Core - Domain Module
//!
//! Domain entities for the sales dashboard.

pub mod audit_log;
pub mod custom_field;
pub mod custom_slide;
pub mod department;
pub mod display_config;
pub mod group;
pub mod integration;
pub mod member;
pub mod period;
pub mod sales_record;
pub mod system_setting;
pub mod target;
pub mod tenant;
pub mod user;

pub use audit_log::{AuditAction, AuditLog};
pub use custom_field::{CustomFieldDefinition, CustomFieldType};
pub use custom_slide::{CustomSlide, SlideContent, SlideType};
pub use department::Department;
pub use display_config::{DisplayConfig, DisplayConfigView, ViewType};
pub use group::{Group, GroupWithMembers};
pub use integration::{Integration, IntegrationProvider, IntegrationSettings};
pub use member::Member;
pub use period::{DateRange, Period, YearMonth};
pub use sales_record::{SalesFilter, SalesRecord, SalesRecordWithMember};
pub use system_setting::SystemSetting;
pub use target::Target;
pub use tenant::Tenant;
pub use user::{Role, User};
