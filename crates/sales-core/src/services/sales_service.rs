//! Sales records: entry, bulk import, listing, export

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use sales_shared::types::{Page, Pagination};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::audit_service::AuditService;
use super::events::{SalesEvent, SalesEventPublisher};
use super::integration_service::{IntegrationService, SaleNotification};
use super::TenantScope;
use crate::domain::custom_field::validate_values;
use crate::domain::member::normalize_optional;
use crate::domain::{
    AuditAction, CustomFieldDefinition, Member, SalesFilter, SalesRecord, SalesRecordWithMember,
};
use crate::error::DomainError;
use crate::report::display_amount;
use crate::repositories::{CustomFieldRepository, MemberRepository, SalesRecordRepository};

#[derive(Debug, Clone)]
pub struct SaleInput {
    pub member_id: Uuid,
    pub amount: i64,
    pub sale_date: NaiveDate,
    pub description: Option<String>,
    pub custom_fields: BTreeMap<String, String>,
}

/// One row of a bulk import. The member is looked up by id, or else by
/// exact name among the tenant's active members.
#[derive(Debug, Clone)]
pub struct ImportRow {
    pub member_id: Option<Uuid>,
    pub member_name: Option<String>,
    pub amount: i64,
    pub sale_date: String,
    pub description: Option<String>,
    pub custom_fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRowResult {
    /// 1-based position in the submitted rows.
    pub row: usize,
    pub status: &'static str,
    pub record_id: Option<Uuid>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub failed: usize,
    pub results: Vec<ImportRowResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFieldValue {
    pub field_id: String,
    pub name: String,
    pub value: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesRecordView {
    #[serde(flatten)]
    pub record: SalesRecord,
    pub member_name: String,
    pub display_amount: f64,
    pub custom_field_values: Vec<ResolvedFieldValue>,
}

/// Records plus the custom field columns an export needs.
#[derive(Debug, Clone)]
pub struct ExportData {
    pub fields: Vec<CustomFieldDefinition>,
    pub records: Vec<SalesRecordWithMember>,
}

pub struct SalesService {
    records: Arc<dyn SalesRecordRepository>,
    members: Arc<dyn MemberRepository>,
    fields: Arc<dyn CustomFieldRepository>,
    integrations: Arc<IntegrationService>,
    events: Arc<dyn SalesEventPublisher>,
    audit: AuditService,
    amount_unit: i64,
}

impl SalesService {
    pub fn new(
        records: Arc<dyn SalesRecordRepository>,
        members: Arc<dyn MemberRepository>,
        fields: Arc<dyn CustomFieldRepository>,
        integrations: Arc<IntegrationService>,
        events: Arc<dyn SalesEventPublisher>,
        audit: AuditService,
        amount_unit: i64,
    ) -> Self {
        Self {
            records,
            members,
            fields,
            integrations,
            events,
            audit,
            amount_unit,
        }
    }

    pub async fn create(&self, scope: TenantScope, input: SaleInput) -> Result<SalesRecord, DomainError> {
        let member = self.active_member(scope.tenant_id, input.member_id).await?;
        let definitions = self.fields.list(scope.tenant_id, false).await?;
        let custom_fields = validate_values(&definitions, input.custom_fields)?;

        let record = SalesRecord::new(
            scope.tenant_id,
            member.id,
            input.amount,
            input.sale_date,
            input.description,
            custom_fields,
            Some(scope.user_id),
        )?;
        let record = self.records.create(&record).await?;
        info!(
            "Sale {} recorded for member {} in tenant {}",
            record.id, member.id, scope.tenant_id
        );

        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::SalesCreate,
                Some(record.id),
                serde_json::json!({ "member_id": member.id, "amount": record.amount }),
            )
            .await;
        self.events
            .publish(scope.tenant_id, SalesEvent::SalesCreated { record_id: record.id });

        let integrations = self.integrations.clone();
        let notification = SaleNotification::new(&record, &member.name, self.amount_unit);
        let tenant_id = scope.tenant_id;
        tokio::spawn(async move {
            integrations.notify_sale(tenant_id, notification).await;
        });

        Ok(record)
    }

    /// Validate each row on its own; valid rows are inserted together.
    pub async fn import(&self, scope: TenantScope, rows: Vec<ImportRow>) -> Result<ImportSummary, DomainError> {
        let members = self.members.list(scope.tenant_id, false).await?;
        let definitions = self.fields.list(scope.tenant_id, false).await?;

        let mut results = Vec::with_capacity(rows.len());
        let mut records = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            match build_import_record(scope, &members, &definitions, row) {
                Ok(record) => {
                    results.push(ImportRowResult {
                        row: index + 1,
                        status: "created",
                        record_id: Some(record.id),
                        error: None,
                    });
                    records.push(record);
                }
                Err(e) => {
                    debug!("Import row {} rejected: {}", index + 1, e);
                    results.push(ImportRowResult {
                        row: index + 1,
                        status: "error",
                        record_id: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        if !records.is_empty() {
            self.records.create_many(&records).await?;
            self.events
                .publish(scope.tenant_id, SalesEvent::SalesImported { count: records.len() });
        }

        let summary = ImportSummary {
            created: records.len(),
            failed: results.len() - records.len(),
            results,
        };
        info!(
            "Import for tenant {}: {} created, {} failed",
            scope.tenant_id, summary.created, summary.failed
        );
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::SalesImport,
                None,
                serde_json::json!({ "created": summary.created, "failed": summary.failed }),
            )
            .await;
        Ok(summary)
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        filter: &SalesFilter,
        pagination: Pagination,
    ) -> Result<Page<SalesRecordView>, DomainError> {
        filter.check()?;
        let definitions = self.fields.list(tenant_id, true).await?;
        let page = self.records.list(tenant_id, filter, pagination).await?;
        debug!("Listed {} of {} sales records", page.items.len(), page.total);

        let unit = self.amount_unit;
        Ok(page.map(|item| {
            let custom_field_values = resolve_fields(&definitions, &item.record.custom_fields);
            SalesRecordView {
                display_amount: display_amount(item.record.amount, unit),
                member_name: item.member_name,
                record: item.record,
                custom_field_values,
            }
        }))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<SalesRecord, DomainError> {
        self.records
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Sales record"))
    }

    /// Replace a record's values. Stored values of deactivated custom
    /// fields are kept; submitted values for them are ignored so a
    /// fetched record can be sent back unchanged.
    pub async fn update(&self, scope: TenantScope, id: Uuid, input: SaleInput) -> Result<SalesRecord, DomainError> {
        let mut record = self.get(scope.tenant_id, id).await?;

        if input.member_id != record.member_id {
            self.active_member(scope.tenant_id, input.member_id).await?;
        } else if self.members.find_by_id(scope.tenant_id, input.member_id).await?.is_none() {
            return Err(DomainError::not_found("Member"));
        }

        let definitions = self.fields.list(scope.tenant_id, true).await?;
        let is_retired = |key: &str| {
            definitions
                .iter()
                .any(|d| !d.is_active && d.id.to_string() == key)
        };
        let submitted: BTreeMap<String, String> = input
            .custom_fields
            .into_iter()
            .filter(|(key, _)| !is_retired(key))
            .collect();
        let mut custom_fields = validate_values(&definitions, submitted)?;
        for (key, value) in &record.custom_fields {
            if is_retired(key) {
                custom_fields.insert(key.clone(), value.clone());
            }
        }

        record.member_id = input.member_id;
        record.amount = input.amount;
        record.sale_date = input.sale_date;
        record.description = normalize_optional(input.description);
        record.custom_fields = custom_fields;
        record.updated_at = chrono::Utc::now();
        record.check()?;

        let record = self.records.update(&record).await?;
        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::SalesUpdate,
                Some(id),
                serde_json::json!({ "member_id": record.member_id, "amount": record.amount }),
            )
            .await;
        self.events
            .publish(scope.tenant_id, SalesEvent::SalesUpdated { record_id: id });
        Ok(record)
    }

    pub async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<(), DomainError> {
        let record = self.get(scope.tenant_id, id).await?;
        self.records.delete(scope.tenant_id, id).await?;
        info!("Sale {} deleted from tenant {}", id, scope.tenant_id);

        self.audit
            .record(
                Some(scope.tenant_id),
                Some(scope.user_id),
                AuditAction::SalesDelete,
                Some(id),
                serde_json::json!({ "member_id": record.member_id, "amount": record.amount }),
            )
            .await;
        self.events
            .publish(scope.tenant_id, SalesEvent::SalesDeleted { record_id: id });
        Ok(())
    }

    /// Every record matching `filter` plus the custom field columns to
    /// export: active fields and inactive fields that still hold values.
    pub async fn export(&self, tenant_id: Uuid, filter: &SalesFilter) -> Result<ExportData, DomainError> {
        filter.check()?;
        let records = self.records.list_all(tenant_id, filter).await?;
        let used: HashSet<String> = records
            .iter()
            .flat_map(|r| r.record.custom_fields.keys().cloned())
            .collect();

        let fields = self
            .fields
            .list(tenant_id, true)
            .await?
            .into_iter()
            .filter(|f| f.is_active || used.contains(&f.id.to_string()))
            .collect();

        Ok(ExportData { fields, records })
    }

    pub fn amount_unit(&self) -> i64 {
        self.amount_unit
    }

    async fn active_member(&self, tenant_id: Uuid, member_id: Uuid) -> Result<Member, DomainError> {
        match self.members.find_by_id(tenant_id, member_id).await? {
            Some(member) if member.is_active => Ok(member),
            Some(_) => {
                warn!("Sale rejected: member {} is inactive", member_id);
                Err(DomainError::validation("Member is not active"))
            }
            None => Err(DomainError::not_found("Member")),
        }
    }
}

fn build_import_record(
    scope: TenantScope,
    members: &[Member],
    definitions: &[CustomFieldDefinition],
    row: ImportRow,
) -> Result<SalesRecord, DomainError> {
    let member = match (row.member_id, row.member_name.as_deref().map(str::trim)) {
        (Some(id), _) => members.iter().find(|m| m.id == id),
        (None, Some(name)) if !name.is_empty() => members.iter().find(|m| m.name == name),
        _ => return Err(DomainError::validation("member_id or member_name is required")),
    }
    .ok_or_else(|| DomainError::validation("Unknown or inactive member"))?;

    let sale_date = NaiveDate::parse_from_str(row.sale_date.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::validation(format!("Invalid sale_date: {}", row.sale_date)))?;
    let custom_fields = validate_values(definitions, row.custom_fields)?;

    SalesRecord::new(
        scope.tenant_id,
        member.id,
        row.amount,
        sale_date,
        row.description,
        custom_fields,
        Some(scope.user_id),
    )
}

/// Custom field values with their field names, in definition order.
/// Values whose definition cannot be found are listed by id.
pub fn resolve_fields(
    definitions: &[CustomFieldDefinition],
    values: &BTreeMap<String, String>,
) -> Vec<ResolvedFieldValue> {
    let mut resolved: Vec<ResolvedFieldValue> = definitions
        .iter()
        .filter_map(|d| {
            let key = d.id.to_string();
            values.get(&key).map(|value| ResolvedFieldValue {
                field_id: key,
                name: d.name.clone(),
                value: value.clone(),
                is_active: d.is_active,
            })
        })
        .collect();

    for (key, value) in values {
        if !resolved.iter().any(|r| r.field_id == *key) {
            resolved.push(ResolvedFieldValue {
                field_id: key.clone(),
                name: key.clone(),
                value: value.clone(),
                is_active: false,
            });
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CustomFieldType;

    #[test]
    fn test_resolve_fields_includes_inactive() {
        let mut retired =
            CustomFieldDefinition::new(Uuid::nil(), "Old".to_string(), CustomFieldType::Text, false, vec![], 1).unwrap();
        retired.is_active = false;
        let current =
            CustomFieldDefinition::new(Uuid::nil(), "New".to_string(), CustomFieldType::Text, false, vec![], 0).unwrap();

        let mut values = BTreeMap::new();
        values.insert(retired.id.to_string(), "a".to_string());
        values.insert(current.id.to_string(), "b".to_string());
        values.insert("orphan".to_string(), "c".to_string());

        let resolved = resolve_fields(&[current, retired], &values);
        let names: Vec<&str> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Old", "orphan"]);
        assert!(!resolved[1].is_active);
    }

    #[test]
    fn test_import_row_member_lookup() {
        let scope = TenantScope {
            tenant_id: Uuid::nil(),
            user_id: Uuid::nil(),
        };
        let member = Member::new(Uuid::nil(), "Kato".to_string(), None, None, None, 0).unwrap();
        let row = |name: Option<&str>, date: &str| ImportRow {
            member_id: None,
            member_name: name.map(String::from),
            amount: 1000,
            sale_date: date.to_string(),
            description: None,
            custom_fields: BTreeMap::new(),
        };

        let record = build_import_record(scope, &[member.clone()], &[], row(Some(" Kato "), "2024-05-01")).unwrap();
        assert_eq!(record.member_id, member.id);

        assert!(build_import_record(scope, &[member.clone()], &[], row(Some("Sato"), "2024-05-01")).is_err());
        assert!(build_import_record(scope, &[member.clone()], &[], row(None, "2024-05-01")).is_err());
        assert!(build_import_record(scope, &[member], &[], row(Some("Kato"), "05/01/2024")).is_err());
    }
}
