//! Dashboard and report through the services

mod common;

use common::{date, Harness};
use sales_core::services::{DashboardQuery, GroupInput, ReportQuery, TargetInput};
use sales_core::{DomainError, Period, YearMonth};

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

#[tokio::test]
async fn test_dashboard_with_targets_and_group() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let b = h.member("Baba").await;
    h.sale(&a, (2024, 5, 2), 300_000).await;
    h.sale(&b, (2024, 5, 3), 100_000).await;
    h.sale(&b, (2024, 4, 30), 999_000).await;

    h.targets
        .upsert(
            h.scope,
            ym(2024, 5),
            vec![TargetInput {
                member_id: a.id,
                monthly: 600_000,
                quarterly: 0,
                annual: 0,
            }],
        )
        .await
        .unwrap();

    let summary = h
        .reports
        .dashboard(
            h.tenant.id,
            DashboardQuery {
                period: Period::Monthly,
                anchor: ym(2024, 5),
                group_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(summary.total, 400_000);
    assert_eq!(summary.members[0].name, "Aoki");
    assert_eq!(summary.members[0].achievement_rate, Some(50.0));
    assert_eq!(summary.members[1].achievement_rate, None);
    assert_eq!(summary.members[0].share, 75.0);

    let group = h
        .groups
        .create(
            h.scope,
            GroupInput {
                name: "B team".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    h.groups.sync_members(h.scope, group.id, vec![b.id]).await.unwrap();

    let summary = h
        .reports
        .dashboard(
            h.tenant.id,
            DashboardQuery {
                period: Period::Quarterly,
                anchor: ym(2024, 5),
                group_id: Some(group.id),
            },
        )
        .await
        .unwrap();
    assert_eq!(summary.members.len(), 1);
    assert_eq!(summary.total, 1_099_000);
}

#[tokio::test]
async fn test_report_landing_uses_month_target() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    h.sale(&a, (2024, 4, 5), 50_000).await;
    h.sale(&a, (2024, 4, 10), 50_000).await;
    h.sale(&a, (2024, 2, 10), 70_000).await;

    h.targets
        .upsert(
            h.scope,
            ym(2024, 4),
            vec![TargetInput {
                member_id: a.id,
                monthly: 300_000,
                quarterly: 0,
                annual: 0,
            }],
        )
        .await
        .unwrap();

    let report = h
        .reports
        .report(
            h.tenant.id,
            ReportQuery {
                start: ym(2024, 1),
                end: ym(2024, 4),
                member_id: None,
                group_id: None,
            },
            date(2024, 4, 10),
        )
        .await
        .unwrap();

    assert_eq!(report.monthly.len(), 4);
    assert_eq!(report.total, 170_000);
    let landing = report.landing.unwrap();
    assert_eq!(landing.month_to_date, 100_000);
    assert_eq!(landing.landing, 300_000);
    assert_eq!(landing.target, Some(300_000));
    assert_eq!(landing.achievement_rate, Some(100.0));
}

#[tokio::test]
async fn test_report_member_filter() {
    let h = Harness::new();
    let a = h.member("Aoki").await;
    let b = h.member("Baba").await;
    h.sale(&a, (2024, 3, 1), 10_000).await;
    h.sale(&b, (2024, 3, 2), 20_000).await;

    let report = h
        .reports
        .report(
            h.tenant.id,
            ReportQuery {
                start: ym(2024, 3),
                end: ym(2024, 3),
                member_id: Some(b.id),
                group_id: None,
            },
            date(2024, 6, 1),
        )
        .await
        .unwrap();
    assert_eq!(report.total, 20_000);
    assert!(report.landing.is_none());

    let missing = h
        .reports
        .report(
            h.tenant.id,
            ReportQuery {
                start: ym(2024, 3),
                end: ym(2024, 3),
                member_id: Some(uuid::Uuid::new_v4()),
                group_id: None,
            },
            date(2024, 6, 1),
        )
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_report_range_limits() {
    let h = Harness::new();
    let query = |start, end| ReportQuery {
        start,
        end,
        member_id: None,
        group_id: None,
    };
    let inverted = h
        .reports
        .report(h.tenant.id, query(ym(2024, 5), ym(2024, 4)), date(2024, 6, 1))
        .await;
    assert!(matches!(inverted, Err(DomainError::ValidationError(_))));

    let too_long = h
        .reports
        .report(h.tenant.id, query(ym(2020, 1), ym(2024, 1)), date(2024, 6, 1))
        .await;
    assert!(matches!(too_long, Err(DomainError::ValidationError(_))));
}
