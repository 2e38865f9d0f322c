//! In-memory repositories and recording ports shared by the service tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use sales_core::repositories::*;
use sales_core::services::*;
use sales_core::*;
use sales_shared::types::{Page, Pagination};

/// One store backing every repository port.
#[derive(Default)]
pub struct MemoryStore {
    pub tenants: RwLock<Vec<Tenant>>,
    pub users: RwLock<Vec<User>>,
    pub members: RwLock<Vec<Member>>,
    pub departments: RwLock<Vec<Department>>,
    pub groups: RwLock<Vec<Group>>,
    pub memberships: RwLock<Vec<(Uuid, Uuid)>>,
    pub records: RwLock<Vec<SalesRecord>>,
    pub targets: RwLock<Vec<Target>>,
    pub fields: RwLock<Vec<CustomFieldDefinition>>,
    pub slides: RwLock<Vec<CustomSlide>>,
    pub display_configs: RwLock<HashMap<Uuid, DisplayConfig>>,
    pub integrations: RwLock<Vec<Integration>>,
    pub audit: RwLock<Vec<AuditLog>>,
    pub settings: RwLock<BTreeMap<String, SystemSetting>>,
}

fn conflict(what: &str) -> DomainError {
    DomainError::Conflict(format!("{} already exists", what))
}

#[async_trait]
impl TenantRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        Ok(self.tenants.read().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.read().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.read().iter().find(|t| t.slug == slug).cloned())
    }

    async fn create(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        let mut tenants = self.tenants.write();
        if tenants.iter().any(|t| t.slug == tenant.slug) {
            return Err(conflict("slug"));
        }
        tenants.push(tenant.clone());
        Ok(tenant.clone())
    }

    async fn update(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        let mut tenants = self.tenants.write();
        let slot = tenants
            .iter_mut()
            .find(|t| t.id == tenant.id)
            .ok_or_else(|| DomainError::not_found("Tenant"))?;
        *slot = tenant.clone();
        Ok(tenant.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.tenants.write().retain(|t| t.id != id);
        self.members.write().retain(|m| m.tenant_id != id);
        self.records.write().retain(|r| r.tenant_id != id);
        self.display_configs.write().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_lowercase();
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, DomainError> {
        Ok(self
            .users
            .read()
            .iter()
            .filter(|u| u.tenant_id == Some(tenant_id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == user.email) {
            return Err(conflict("email"));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write();
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DomainError::not_found("User"))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.users
            .write()
            .retain(|u| !(u.id == id && u.tenant_id == Some(tenant_id)));
        Ok(())
    }

    async fn exists_super_admin(&self) -> Result<bool, DomainError> {
        Ok(self.users.read().iter().any(|u| u.role == Role::SuperAdmin))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<Member>, DomainError> {
        let mut members: Vec<Member> = self
            .members
            .read()
            .iter()
            .filter(|m| m.tenant_id == tenant_id && (include_inactive || m.is_active))
            .cloned()
            .collect();
        members.sort_by(|a, b| a.display_order.cmp(&b.display_order).then_with(|| a.name.cmp(&b.name)));
        Ok(members)
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Member>, DomainError> {
        Ok(self
            .members
            .read()
            .iter()
            .find(|m| m.tenant_id == tenant_id && m.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, tenant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .members
            .read()
            .iter()
            .filter(|m| m.tenant_id == tenant_id && ids.contains(&m.id))
            .cloned()
            .collect())
    }

    async fn create(&self, member: &Member) -> Result<Member, DomainError> {
        self.members.write().push(member.clone());
        Ok(member.clone())
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let mut members = self.members.write();
        let slot = members
            .iter_mut()
            .find(|m| m.id == member.id && m.tenant_id == member.tenant_id)
            .ok_or_else(|| DomainError::not_found("Member"))?;
        *slot = member.clone();
        Ok(member.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.members.write().retain(|m| !(m.tenant_id == tenant_id && m.id == id));
        self.memberships.write().retain(|(_, member_id)| *member_id != id);
        Ok(())
    }
}

/// User port whose inserts fail, as when a concurrent signup wins the
/// unique email index between the precheck and the write.
pub struct FailingUserInsert(pub Arc<MemoryStore>);

#[async_trait]
impl UserRepository for FailingUserInsert {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        UserRepository::find_by_id(self.0.as_ref(), id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        UserRepository::find_by_email(self.0.as_ref(), email).await
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, DomainError> {
        UserRepository::list_by_tenant(self.0.as_ref(), tenant_id).await
    }

    async fn create(&self, _user: &User) -> Result<User, DomainError> {
        Err(DomainError::Conflict("Email already registered".to_string()))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        UserRepository::update(self.0.as_ref(), user).await
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        UserRepository::delete(self.0.as_ref(), tenant_id, id).await
    }

    async fn exists_super_admin(&self) -> Result<bool, DomainError> {
        UserRepository::exists_super_admin(self.0.as_ref()).await
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Department>, DomainError> {
        Ok(self
            .departments
            .read()
            .iter()
            .filter(|d| d.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Department>, DomainError> {
        Ok(self
            .departments
            .read()
            .iter()
            .find(|d| d.tenant_id == tenant_id && d.id == id)
            .cloned())
    }

    async fn create(&self, department: &Department) -> Result<Department, DomainError> {
        let mut departments = self.departments.write();
        if departments
            .iter()
            .any(|d| d.tenant_id == department.tenant_id && d.name == department.name)
        {
            return Err(conflict("department"));
        }
        departments.push(department.clone());
        Ok(department.clone())
    }

    async fn update(&self, department: &Department) -> Result<Department, DomainError> {
        let mut departments = self.departments.write();
        let slot = departments
            .iter_mut()
            .find(|d| d.id == department.id)
            .ok_or_else(|| DomainError::not_found("Department"))?;
        *slot = department.clone();
        Ok(department.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.departments.write().retain(|d| !(d.tenant_id == tenant_id && d.id == id));
        for member in self.members.write().iter_mut() {
            if member.department_id == Some(id) {
                member.department_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Group>, DomainError> {
        Ok(self
            .groups
            .read()
            .iter()
            .filter(|g| g.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Group>, DomainError> {
        Ok(self
            .groups
            .read()
            .iter()
            .find(|g| g.tenant_id == tenant_id && g.id == id)
            .cloned())
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let mut groups = self.groups.write();
        if groups.iter().any(|g| g.tenant_id == group.tenant_id && g.name == group.name) {
            return Err(conflict("group"));
        }
        groups.push(group.clone());
        Ok(group.clone())
    }

    async fn update(&self, group: &Group) -> Result<Group, DomainError> {
        let mut groups = self.groups.write();
        let slot = groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or_else(|| DomainError::not_found("Group"))?;
        *slot = group.clone();
        Ok(group.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.groups.write().retain(|g| !(g.tenant_id == tenant_id && g.id == id));
        self.memberships.write().retain(|(group_id, _)| *group_id != id);
        Ok(())
    }

    async fn member_ids(&self, _tenant_id: Uuid, group_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .memberships
            .read()
            .iter()
            .filter(|(g, _)| *g == group_id)
            .map(|(_, m)| *m)
            .collect())
    }

    async fn members(&self, tenant_id: Uuid, group_id: Uuid) -> Result<Vec<Member>, DomainError> {
        let ids = GroupRepository::member_ids(self, tenant_id, group_id).await?;
        let all = MemberRepository::list(self, tenant_id, true).await?;
        Ok(all.into_iter().filter(|m| ids.contains(&m.id)).collect())
    }

    async fn memberships(&self, tenant_id: Uuid) -> Result<Vec<(Uuid, Uuid)>, DomainError> {
        let groups: Vec<Uuid> = GroupRepository::list(self, tenant_id)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();
        Ok(self
            .memberships
            .read()
            .iter()
            .filter(|(g, _)| groups.contains(g))
            .copied()
            .collect())
    }

    async fn replace_members(&self, _tenant_id: Uuid, group_id: Uuid, member_ids: &[Uuid]) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write();
        memberships.retain(|(g, _)| *g != group_id);
        memberships.extend(member_ids.iter().map(|m| (group_id, *m)));
        Ok(())
    }
}

impl MemoryStore {
    fn matching(&self, tenant_id: Uuid, filter: &SalesFilter) -> Vec<SalesRecordWithMember> {
        let members = self.members.read();
        let mut rows: Vec<SalesRecordWithMember> = self
            .records
            .read()
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .filter(|r| filter.start_date.map_or(true, |d| r.sale_date >= d))
            .filter(|r| filter.end_date.map_or(true, |d| r.sale_date <= d))
            .filter(|r| filter.member_ids.as_ref().map_or(true, |ids| ids.contains(&r.member_id)))
            .map(|r| SalesRecordWithMember {
                record: r.clone(),
                member_name: members
                    .iter()
                    .find(|m| m.id == r.member_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_default(),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.record
                .sale_date
                .cmp(&a.record.sale_date)
                .then(b.record.created_at.cmp(&a.record.created_at))
        });
        rows
    }
}

#[async_trait]
impl SalesRecordRepository for MemoryStore {
    async fn create(&self, record: &SalesRecord) -> Result<SalesRecord, DomainError> {
        self.records.write().push(record.clone());
        Ok(record.clone())
    }

    async fn create_many(&self, records: &[SalesRecord]) -> Result<(), DomainError> {
        self.records.write().extend(records.iter().cloned());
        Ok(())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<SalesRecord>, DomainError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.tenant_id == tenant_id && r.id == id)
            .cloned())
    }

    async fn update(&self, record: &SalesRecord) -> Result<SalesRecord, DomainError> {
        let mut records = self.records.write();
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id && r.tenant_id == record.tenant_id)
            .ok_or_else(|| DomainError::not_found("Sales record"))?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.records.write().retain(|r| !(r.tenant_id == tenant_id && r.id == id));
        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        filter: &SalesFilter,
        pagination: Pagination,
    ) -> Result<Page<SalesRecordWithMember>, DomainError> {
        let rows = self.matching(tenant_id, filter);
        let total = rows.len() as i64;
        let items = rows
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(Page::new(items, total, pagination))
    }

    async fn list_all(&self, tenant_id: Uuid, filter: &SalesFilter) -> Result<Vec<SalesRecordWithMember>, DomainError> {
        Ok(self.matching(tenant_id, filter))
    }
}

#[async_trait]
impl TargetRepository for MemoryStore {
    async fn list_for_month(&self, tenant_id: Uuid, month: YearMonth) -> Result<Vec<Target>, DomainError> {
        Ok(self
            .targets
            .read()
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.year_month() == month)
            .cloned()
            .collect())
    }

    async fn list_for_year(&self, tenant_id: Uuid, year: i32) -> Result<Vec<Target>, DomainError> {
        Ok(self
            .targets
            .read()
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.year == year)
            .cloned()
            .collect())
    }

    async fn upsert(&self, targets: &[Target]) -> Result<(), DomainError> {
        let mut stored = self.targets.write();
        for target in targets {
            stored.retain(|t| {
                !(t.tenant_id == target.tenant_id
                    && t.member_id == target.member_id
                    && t.year_month() == target.year_month())
            });
            stored.push(target.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl CustomFieldRepository for MemoryStore {
    async fn list(&self, tenant_id: Uuid, include_inactive: bool) -> Result<Vec<CustomFieldDefinition>, DomainError> {
        let mut fields: Vec<CustomFieldDefinition> = self
            .fields
            .read()
            .iter()
            .filter(|f| f.tenant_id == tenant_id && (include_inactive || f.is_active))
            .cloned()
            .collect();
        fields.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(fields)
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<CustomFieldDefinition>, DomainError> {
        Ok(self
            .fields
            .read()
            .iter()
            .find(|f| f.tenant_id == tenant_id && f.id == id)
            .cloned())
    }

    async fn create(&self, field: &CustomFieldDefinition) -> Result<CustomFieldDefinition, DomainError> {
        self.fields.write().push(field.clone());
        Ok(field.clone())
    }

    async fn update(&self, field: &CustomFieldDefinition) -> Result<CustomFieldDefinition, DomainError> {
        let mut fields = self.fields.write();
        let slot = fields
            .iter_mut()
            .find(|f| f.id == field.id)
            .ok_or_else(|| DomainError::not_found("Custom field"))?;
        *slot = field.clone();
        Ok(field.clone())
    }

    async fn deactivate(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        for field in self.fields.write().iter_mut() {
            if field.tenant_id == tenant_id && field.id == id {
                field.is_active = false;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CustomSlideRepository for MemoryStore {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<CustomSlide>, DomainError> {
        Ok(self
            .slides
            .read()
            .iter()
            .filter(|s| s.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<CustomSlide>, DomainError> {
        Ok(self
            .slides
            .read()
            .iter()
            .find(|s| s.tenant_id == tenant_id && s.id == id)
            .cloned())
    }

    async fn create(&self, slide: &CustomSlide) -> Result<CustomSlide, DomainError> {
        self.slides.write().push(slide.clone());
        Ok(slide.clone())
    }

    async fn update(&self, slide: &CustomSlide) -> Result<CustomSlide, DomainError> {
        let mut slides = self.slides.write();
        let slot = slides
            .iter_mut()
            .find(|s| s.id == slide.id)
            .ok_or_else(|| DomainError::not_found("Custom slide"))?;
        *slot = slide.clone();
        Ok(slide.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.slides.write().retain(|s| !(s.tenant_id == tenant_id && s.id == id));
        Ok(())
    }
}

#[async_trait]
impl DisplayConfigRepository for MemoryStore {
    async fn find(&self, tenant_id: Uuid) -> Result<Option<DisplayConfig>, DomainError> {
        Ok(self.display_configs.read().get(&tenant_id).cloned())
    }

    async fn replace(&self, config: &DisplayConfig) -> Result<DisplayConfig, DomainError> {
        self.display_configs.write().insert(config.tenant_id, config.clone());
        Ok(config.clone())
    }
}

#[async_trait]
impl IntegrationRepository for MemoryStore {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError> {
        Ok(self
            .integrations
            .read()
            .iter()
            .filter(|i| i.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Integration>, DomainError> {
        Ok(self
            .integrations
            .read()
            .iter()
            .find(|i| i.tenant_id == tenant_id && i.id == id)
            .cloned())
    }

    async fn upsert(&self, integration: &Integration) -> Result<Integration, DomainError> {
        let mut integrations = self.integrations.write();
        integrations.retain(|i| !(i.tenant_id == integration.tenant_id && i.provider == integration.provider));
        integrations.push(integration.clone());
        Ok(integration.clone())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.integrations.write().retain(|i| !(i.tenant_id == tenant_id && i.id == id));
        Ok(())
    }

    async fn list_active(&self, tenant_id: Uuid) -> Result<Vec<Integration>, DomainError> {
        Ok(IntegrationRepository::list(self, tenant_id)
            .await?
            .into_iter()
            .filter(|i| i.is_active)
            .collect())
    }
}

#[async_trait]
impl AuditLogRepository for MemoryStore {
    async fn append(&self, entry: &AuditLog) -> Result<(), DomainError> {
        self.audit.write().push(entry.clone());
        Ok(())
    }

    async fn list(&self, tenant_id: Uuid, pagination: Pagination) -> Result<Page<AuditLog>, DomainError> {
        let logs: Vec<AuditLog> = self
            .audit
            .read()
            .iter()
            .rev()
            .filter(|l| l.tenant_id == Some(tenant_id))
            .cloned()
            .collect();
        let total = logs.len() as i64;
        let items = logs
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(Page::new(items, total, pagination))
    }
}

#[async_trait]
impl SystemSettingRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<SystemSetting>, DomainError> {
        Ok(self.settings.read().values().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<SystemSetting>, DomainError> {
        Ok(self.settings.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<SystemSetting, DomainError> {
        let setting = SystemSetting {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        };
        self.settings.write().insert(key.to_string(), setting.clone());
        Ok(setting)
    }
}

/// Collects published events.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<(Uuid, SalesEvent)>>,
}

impl SalesEventPublisher for RecordingPublisher {
    fn publish(&self, tenant_id: Uuid, event: SalesEvent) {
        self.events.lock().push((tenant_id, event));
    }
}

/// Collects delivered messages; fails every call when `fail` is set.
#[derive(Default)]
pub struct RecordingSender {
    pub sales: Mutex<Vec<(IntegrationProvider, SaleNotification)>>,
    pub texts: Mutex<Vec<(IntegrationProvider, String)>>,
    pub fail: bool,
}

#[async_trait]
impl WebhookSender for RecordingSender {
    async fn send_sale(&self, integration: &Integration, sale: &SaleNotification) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::ExternalService("webhook returned 500".to_string()));
        }
        self.sales.lock().push((integration.provider, sale.clone()));
        Ok(())
    }

    async fn send_text(&self, integration: &Integration, text: &str) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::ExternalService("webhook returned 500".to_string()));
        }
        self.texts.lock().push((integration.provider, text.to_string()));
        Ok(())
    }
}

pub const AMOUNT_UNIT: i64 = 10_000;

/// Services wired over one `MemoryStore`.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub events: Arc<RecordingPublisher>,
    pub sender: Arc<RecordingSender>,
    pub tenant: Tenant,
    pub scope: TenantScope,
    pub audit: AuditService,
    pub members: MemberService,
    pub groups: GroupService,
    pub sales: SalesService,
    pub reports: ReportService,
    pub targets: TargetService,
    pub fields: CustomFieldService,
    pub display: DisplayService,
    pub slides: CustomSlideService,
    pub integrations: Arc<IntegrationService>,
    pub tenants: TenantService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_sender(RecordingSender::default())
    }

    pub fn with_sender(sender: RecordingSender) -> Self {
        let store = Arc::new(MemoryStore::default());
        let events = Arc::new(RecordingPublisher::default());
        let sender = Arc::new(sender);

        let tenant = Tenant::new("Acme".to_string(), "acme".to_string()).unwrap();
        store.tenants.write().push(tenant.clone());
        let scope = TenantScope {
            tenant_id: tenant.id,
            user_id: Uuid::new_v4(),
        };

        let audit = AuditService::new(store.clone());
        let integrations = Arc::new(IntegrationService::new(store.clone(), sender.clone(), audit.clone()));

        Self {
            members: MemberService::new(store.clone(), store.clone(), audit.clone()),
            groups: GroupService::new(store.clone(), store.clone(), audit.clone()),
            sales: SalesService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                integrations.clone(),
                events.clone(),
                audit.clone(),
                AMOUNT_UNIT,
            ),
            reports: ReportService::new(store.clone(), store.clone(), store.clone(), store.clone(), AMOUNT_UNIT),
            targets: TargetService::new(store.clone(), store.clone(), audit.clone()),
            fields: CustomFieldService::new(store.clone(), audit.clone()),
            display: DisplayService::new(store.clone(), store.clone(), audit.clone()),
            slides: CustomSlideService::new(store.clone(), audit.clone()),
            tenants: TenantService::new(store.clone(), store.clone(), store.clone(), audit.clone()),
            integrations,
            audit,
            store,
            events,
            sender,
            tenant,
            scope,
        }
    }

    pub async fn member(&self, name: &str) -> Member {
        self.members
            .create(
                self.scope,
                MemberInput {
                    name: name.to_string(),
                    email: None,
                    department_id: None,
                    image_url: None,
                    display_order: 0,
                    is_active: true,
                },
            )
            .await
            .unwrap()
    }

    pub async fn sale(&self, member: &Member, date: (i32, u32, u32), amount: i64) -> SalesRecord {
        self.sales
            .create(
                self.scope,
                SaleInput {
                    member_id: member.id,
                    amount,
                    sale_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                    description: None,
                    custom_fields: BTreeMap::new(),
                },
            )
            .await
            .unwrap()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
