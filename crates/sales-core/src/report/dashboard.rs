//! Dashboard summary: per-member totals, ranking, shares and the
//! cumulative daily trend for one period.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::{display_amount, percentage};
use crate::domain::target::{achievement_rate, period_target};
use crate::domain::{Member, Period, SalesRecord, Target, YearMonth};

pub struct DashboardInput<'a> {
    /// Candidate members. Inactive members only appear when they sold
    /// something in the period.
    pub members: &'a [Member],
    pub records: &'a [SalesRecord],
    pub targets: &'a [Target],
    pub period: Period,
    pub anchor: YearMonth,
    pub amount_unit: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    pub member_id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub department_id: Option<Uuid>,
    pub total: i64,
    pub display_total: f64,
    pub record_count: usize,
    pub target: i64,
    pub display_target: f64,
    pub achievement_rate: Option<f64>,
    pub rank: u32,
    /// Percentage of the tenant total.
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub amount: i64,
    pub cumulative: i64,
    pub display_cumulative: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub period: Period,
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount_unit: i64,
    pub total: i64,
    pub display_total: f64,
    pub target_total: i64,
    pub display_target_total: f64,
    pub achievement_rate: Option<f64>,
    pub record_count: usize,
    pub members: Vec<MemberSummary>,
    pub daily_trend: Vec<CumulativePoint>,
}

pub fn build_dashboard(input: DashboardInput<'_>) -> DashboardSummary {
    let unit = input.amount_unit;
    let range = input.period.range(input.anchor);
    let records: Vec<&SalesRecord> = input
        .records
        .iter()
        .filter(|r| range.contains(r.sale_date))
        .collect();

    let mut totals: HashMap<Uuid, (i64, usize)> = HashMap::new();
    for record in &records {
        let entry = totals.entry(record.member_id).or_insert((0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    let mut members: Vec<(&Member, i64, usize)> = input
        .members
        .iter()
        .map(|m| {
            let (total, count) = totals.get(&m.id).copied().unwrap_or((0, 0));
            (m, total, count)
        })
        .filter(|(m, total, _)| m.is_active || *total > 0)
        .collect();

    members.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(a.0.display_order.cmp(&b.0.display_order))
            .then_with(|| a.0.name.cmp(&b.0.name))
    });

    let total: i64 = members.iter().map(|(_, t, _)| t).sum();
    let ranks = competition_ranks(&members.iter().map(|(_, t, _)| *t).collect::<Vec<_>>());

    let summaries: Vec<MemberSummary> = members
        .iter()
        .zip(ranks)
        .map(|((member, member_total, count), rank)| {
            let target = period_target(input.targets, member.id, input.period, input.anchor);
            MemberSummary {
                member_id: member.id,
                name: member.name.clone(),
                image_url: member.image_url.clone(),
                department_id: member.department_id,
                total: *member_total,
                display_total: display_amount(*member_total, unit),
                record_count: *count,
                target,
                display_target: display_amount(target, unit),
                achievement_rate: achievement_rate(*member_total, target),
                rank,
                share: percentage(*member_total, total),
            }
        })
        .collect();

    let shown: HashSet<Uuid> = summaries.iter().map(|s| s.member_id).collect();
    let mut per_day: HashMap<NaiveDate, i64> = HashMap::new();
    for record in records.iter().filter(|r| shown.contains(&r.member_id)) {
        *per_day.entry(record.sale_date).or_insert(0) += record.amount;
    }

    let mut cumulative = 0;
    let daily_trend = range
        .start
        .iter_days()
        .take_while(|d| *d <= range.end)
        .map(|date| {
            let amount = per_day.get(&date).copied().unwrap_or(0);
            cumulative += amount;
            CumulativePoint {
                date,
                amount,
                cumulative,
                display_cumulative: display_amount(cumulative, unit),
            }
        })
        .collect();

    let target_total: i64 = summaries.iter().map(|s| s.target).sum();
    let record_count: usize = summaries.iter().map(|s| s.record_count).sum();

    DashboardSummary {
        period: input.period,
        year: input.anchor.year,
        month: input.anchor.month,
        start_date: range.start,
        end_date: range.end,
        amount_unit: unit,
        total,
        display_total: display_amount(total, unit),
        target_total,
        display_target_total: display_amount(target_total, unit),
        achievement_rate: achievement_rate(total, target_total),
        record_count,
        members: summaries,
        daily_trend,
    }
}

/// Competition ranking ("1224") over totals sorted descending.
pub fn competition_ranks(sorted_totals: &[i64]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_totals.len());
    for (i, total) in sorted_totals.iter().enumerate() {
        let rank = match i {
            0 => 1,
            _ if sorted_totals[i - 1] == *total => ranks[i - 1],
            _ => i as u32 + 1,
        };
        ranks.push(rank);
    }
    ranks
}
