//! Sales entry, import, listing and export

mod common;

use std::collections::BTreeMap;
use std::time::Duration;

use common::{date, Harness, RecordingSender};
use sales_core::domain::integration::IntegrationSettings;
use sales_core::services::{CustomFieldInput, ImportRow, SaleInput, SalesEvent};
use sales_core::{CustomFieldType, DomainError, IntegrationProvider, SalesFilter};
use sales_shared::types::Pagination;

fn sale_input(member_id: uuid::Uuid, amount: i64) -> SaleInput {
    SaleInput {
        member_id,
        amount,
        sale_date: date(2024, 5, 10),
        description: Some("Renewal".to_string()),
        custom_fields: BTreeMap::new(),
    }
}

fn field_input(name: &str, field_type: CustomFieldType, required: bool, options: &[&str]) -> CustomFieldInput {
    CustomFieldInput {
        name: name.to_string(),
        field_type,
        is_required: required,
        options: options.iter().map(|s| s.to_string()).collect(),
        sort_order: 0,
    }
}

#[tokio::test]
async fn test_create_publishes_and_audits() {
    let h = Harness::new();
    let member = h.member("Aoki").await;

    let record = h.sales.create(h.scope, sale_input(member.id, 120_000)).await.unwrap();
    assert_eq!(record.created_by, Some(h.scope.user_id));

    let events = h.events.events.lock().clone();
    assert_eq!(events, vec![(h.tenant.id, SalesEvent::SalesCreated { record_id: record.id })]);

    let audit = h.store.audit.read();
    assert!(audit.iter().any(|l| l.action == "SALES_CREATE" && l.entity_id == Some(record.id)));
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let h = Harness::new();
    let member = h.member("Aoki").await;

    let result = h.sales.create(h.scope, sale_input(member.id, 0)).await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));

    let result = h.sales.create(h.scope, sale_input(uuid::Uuid::new_v4(), 100)).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));

    h.store.members.write()[0].is_active = false;
    let result = h.sales.create(h.scope, sale_input(member.id, 100)).await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));

    assert!(h.store.records.read().is_empty());
    assert!(h.events.events.lock().is_empty());
}

#[tokio::test]
async fn test_custom_field_validation_on_create() {
    let h = Harness::new();
    let member = h.member("Aoki").await;
    let channel = h
        .fields
        .create(h.scope, field_input("Channel", CustomFieldType::Select, true, &["Web", "Store"]))
        .await
        .unwrap();

    let missing = h.sales.create(h.scope, sale_input(member.id, 100)).await;
    assert!(matches!(missing, Err(DomainError::ValidationError(_))));

    let mut input = sale_input(member.id, 100);
    input.custom_fields.insert(channel.id.to_string(), "Phone".to_string());
    assert!(h.sales.create(h.scope, input).await.is_err());

    let mut input = sale_input(member.id, 100);
    input.custom_fields.insert("not-a-field".to_string(), "x".to_string());
    assert!(h.sales.create(h.scope, input).await.is_err());

    let mut input = sale_input(member.id, 100);
    input.custom_fields.insert(channel.id.to_string(), "Web".to_string());
    let record = h.sales.create(h.scope, input).await.unwrap();
    assert_eq!(record.custom_fields.get(&channel.id.to_string()).map(String::as_str), Some("Web"));
}

#[tokio::test]
async fn test_update_keeps_values_of_retired_fields() {
    let h = Harness::new();
    let member = h.member("Aoki").await;
    let old = h
        .fields
        .create(h.scope, field_input("Campaign", CustomFieldType::Text, false, &[]))
        .await
        .unwrap();

    let mut input = sale_input(member.id, 100);
    input.custom_fields.insert(old.id.to_string(), "Spring".to_string());
    let record = h.sales.create(h.scope, input).await.unwrap();

    h.fields.delete(h.scope, old.id).await.unwrap();

    let updated = h
        .sales
        .update(h.scope, record.id, sale_input(member.id, 250))
        .await
        .unwrap();
    assert_eq!(updated.amount, 250);
    assert_eq!(updated.custom_fields.get(&old.id.to_string()).map(String::as_str), Some("Spring"));

    // listing still resolves the retired field's name
    let page = h
        .sales
        .list(h.tenant.id, &SalesFilter::default(), Pagination::default())
        .await
        .unwrap();
    let values = &page.items[0].custom_field_values;
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].name, "Campaign");
    assert!(!values[0].is_active);
}

#[tokio::test]
async fn test_update_accepts_fetched_record_with_retired_values() {
    let h = Harness::new();
    let member = h.member("Ishii").await;
    let old = h
        .fields
        .create(h.scope, field_input("Campaign", CustomFieldType::Text, false, &[]))
        .await
        .unwrap();

    let mut input = sale_input(member.id, 100);
    input.custom_fields.insert(old.id.to_string(), "Spring".to_string());
    let record = h.sales.create(h.scope, input).await.unwrap();
    h.fields.delete(h.scope, old.id).await.unwrap();

    // send back exactly what the client fetched, with an edited amount
    let fetched = h.sales.get(h.tenant.id, record.id).await.unwrap();
    let mut resubmitted = sale_input(member.id, 300);
    resubmitted.custom_fields = fetched.custom_fields.clone();
    let updated = h.sales.update(h.scope, record.id, resubmitted).await.unwrap();
    assert_eq!(updated.amount, 300);
    assert_eq!(updated.custom_fields.get(&old.id.to_string()).map(String::as_str), Some("Spring"));

    // a changed value for a retired field does not overwrite the stored one
    let mut edited = sale_input(member.id, 300);
    edited.custom_fields.insert(old.id.to_string(), "Autumn".to_string());
    let updated = h.sales.update(h.scope, record.id, edited).await.unwrap();
    assert_eq!(updated.custom_fields.get(&old.id.to_string()).map(String::as_str), Some("Spring"));
}

#[tokio::test]
async fn test_list_filters_and_orders() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let b = h.member("Baba").await;
    h.sale(&a, (2024, 5, 1), 10_000).await;
    h.sale(&b, (2024, 5, 3), 20_000).await;
    h.sale(&a, (2024, 6, 1), 30_000).await;

    let filter = SalesFilter {
        start_date: Some(date(2024, 5, 1)),
        end_date: Some(date(2024, 5, 31)),
        member_ids: None,
    };
    let page = h.sales.list(h.tenant.id, &filter, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].member_name, "Baba");
    assert_eq!(page.items[0].display_amount, 2.0);

    let filter = SalesFilter {
        member_ids: Some(vec![a.id]),
        ..Default::default()
    };
    let page = h.sales.list(h.tenant.id, &filter, Pagination::new(Some(1), Some(1))).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].record.sale_date, date(2024, 6, 1));

    let inverted = SalesFilter::between(date(2024, 6, 1), date(2024, 5, 1));
    assert!(h.sales.list(h.tenant.id, &inverted, Pagination::default()).await.is_err());
}

#[tokio::test]
async fn test_delete_publishes_event() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let record = h.sale(&a, (2024, 5, 1), 10_000).await;

    h.sales.delete(h.scope, record.id).await.unwrap();
    assert!(h.store.records.read().is_empty());
    let last = h.events.events.lock().last().cloned();
    assert_eq!(last, Some((h.tenant.id, SalesEvent::SalesDeleted { record_id: record.id })));

    let again = h.sales.delete(h.scope, record.id).await;
    assert!(matches!(again, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_import_reports_per_row() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let row = |name: Option<&str>, id: Option<uuid::Uuid>, amount: i64, date: &str| ImportRow {
        member_id: id,
        member_name: name.map(String::from),
        amount,
        sale_date: date.to_string(),
        description: None,
        custom_fields: BTreeMap::new(),
    };

    let summary = h
        .sales
        .import(
            h.scope,
            vec![
                row(Some("Aoki"), None, 10_000, "2024-05-01"),
                row(None, Some(a.id), 20_000, "2024-05-02"),
                row(Some("Nobody"), None, 10_000, "2024-05-01"),
                row(Some("Aoki"), None, -5, "2024-05-01"),
                row(Some("Aoki"), None, 10_000, "yesterday"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(summary.created, 2);
    assert_eq!(summary.failed, 3);
    let statuses: Vec<&str> = summary.results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec!["created", "created", "error", "error", "error"]);
    assert_eq!(summary.results[2].row, 3);
    assert!(summary.results[2].error.is_some());

    assert_eq!(h.store.records.read().len(), 2);
    let events = h.events.events.lock().clone();
    assert_eq!(events, vec![(h.tenant.id, SalesEvent::SalesImported { count: 2 })]);
}

#[tokio::test]
async fn test_export_columns_include_retired_fields_with_values() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let used = h
        .fields
        .create(h.scope, field_input("Campaign", CustomFieldType::Text, false, &[]))
        .await
        .unwrap();
    let unused = h
        .fields
        .create(h.scope, field_input("Memo", CustomFieldType::Text, false, &[]))
        .await
        .unwrap();
    let active = h
        .fields
        .create(h.scope, field_input("Region", CustomFieldType::Text, false, &[]))
        .await
        .unwrap();

    let mut input = sale_input(a.id, 100);
    input.custom_fields.insert(used.id.to_string(), "Spring".to_string());
    h.sales.create(h.scope, input).await.unwrap();

    h.fields.delete(h.scope, used.id).await.unwrap();
    h.fields.delete(h.scope, unused.id).await.unwrap();

    let export = h.sales.export(h.tenant.id, &SalesFilter::default()).await.unwrap();
    let mut names: Vec<&str> = export.fields.iter().map(|f| f.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Campaign", "Region"]);
    assert!(export.fields.iter().any(|f| f.id == active.id));
    assert_eq!(export.records.len(), 1);
}

#[tokio::test]
async fn test_webhook_fires_after_create() {
    let h = Harness::new();
    h.integrations
        .upsert(
            h.scope,
            IntegrationProvider::Slack,
            IntegrationSettings {
                webhook_url: Some("https://hooks.slack.com/services/T/B/X".to_string()),
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let a = h.member("Aoki").await;
    h.sale(&a, (2024, 5, 1), 25_000).await;

    for _ in 0..50 {
        if !h.sender.sales.lock().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let sent = h.sender.sales.lock().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, IntegrationProvider::Slack);
    assert_eq!(sent[0].1.member, "Aoki");
    assert_eq!(sent[0].1.display_amount, 2.5);
}

#[tokio::test]
async fn test_webhook_failure_does_not_fail_sale() {
    let h = Harness::with_sender(RecordingSender {
        fail: true,
        ..Default::default()
    });
    h.integrations
        .upsert(
            h.scope,
            IntegrationProvider::Generic,
            IntegrationSettings {
                webhook_url: Some("https://example.com/hook".to_string()),
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let a = h.member("Aoki").await;
    let result = h
        .sales
        .create(h.scope, sale_input(a.id, 100))
        .await;
    assert!(result.is_ok());

    let integration = h.integrations.list(h.tenant.id).await.unwrap().remove(0);
    let test = h.integrations.test(h.tenant.id, integration.id).await;
    assert!(matches!(test, Err(DomainError::ExternalService(_))));
}
