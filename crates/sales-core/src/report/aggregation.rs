//! Period report: monthly trend, moving average, daily breakdown,
//! weekday and tri-decade splits, landing projection.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{display_amount, percentage, round1};
use crate::domain::{SalesRecord, YearMonth};
use crate::error::DomainError;

/// Indexed by `num_days_from_sunday`.
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const TRI_DECADES: [&str; 3] = ["1-10", "11-20", "21-end"];

pub struct ReportInput<'a> {
    pub records: &'a [SalesRecord],
    pub start: YearMonth,
    pub end: YearMonth,
    pub today: NaiveDate,
    /// Summed monthly target of the month containing `today`.
    pub current_month_target: Option<i64>,
    pub amount_unit: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub amount: i64,
    pub display_amount: f64,
    /// Mean of this and the two previous months; absent for the first two.
    pub moving_average: Option<f64>,
    pub display_moving_average: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub amount: i64,
    pub display_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekdayShare {
    pub weekday: &'static str,
    pub amount: i64,
    pub display_amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriDecadeShare {
    pub label: &'static str,
    pub record_count: usize,
    pub amount: i64,
    pub display_amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingProjection {
    pub month: String,
    pub month_to_date: i64,
    pub elapsed_days: u32,
    pub days_in_month: u32,
    pub days_remaining: u32,
    pub daily_average: f64,
    pub landing: i64,
    pub display_landing: f64,
    pub target: Option<i64>,
    pub achievement_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub start_month: String,
    pub end_month: String,
    pub total: i64,
    pub display_total: f64,
    pub record_count: usize,
    pub monthly: Vec<MonthlyPoint>,
    pub daily: Vec<DailyPoint>,
    pub day_of_week: Vec<WeekdayShare>,
    pub tri_decade: Vec<TriDecadeShare>,
    pub landing: Option<LandingProjection>,
}

/// Aggregate records of `[start, end]` (inclusive months). Records outside
/// the range are ignored.
pub fn build_report(input: ReportInput<'_>) -> Result<SalesReport, DomainError> {
    if input.start > input.end {
        return Err(DomainError::validation("start month must not be after end month"));
    }
    let unit = input.amount_unit;
    let months = input.start.through(input.end);
    let first_day = input.start.first_day();
    let last_day = input.end.last_day();
    let records: Vec<&SalesRecord> = input
        .records
        .iter()
        .filter(|r| r.sale_date >= first_day && r.sale_date <= last_day)
        .collect();

    let mut per_month: BTreeMap<YearMonth, i64> = months.iter().map(|m| (*m, 0)).collect();
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut per_weekday = [0i64; 7];
    let mut per_decade = [(0usize, 0i64); 3];

    for record in &records {
        *per_month.entry(YearMonth::of(record.sale_date)).or_insert(0) += record.amount;
        *per_day.entry(record.sale_date).or_insert(0) += record.amount;
        per_weekday[record.sale_date.weekday().num_days_from_sunday() as usize] += record.amount;
        let bucket = tri_decade_index(record.sale_date.day());
        per_decade[bucket].0 += 1;
        per_decade[bucket].1 += record.amount;
    }

    let total: i64 = records.iter().map(|r| r.amount).sum();

    let amounts: Vec<i64> = per_month.values().copied().collect();
    let monthly = per_month
        .iter()
        .enumerate()
        .map(|(i, (month, amount))| {
            let moving_average = moving_average(&amounts, i);
            MonthlyPoint {
                month: month.to_string(),
                amount: *amount,
                display_amount: display_amount(*amount, unit),
                moving_average,
                display_moving_average: moving_average.map(|avg| round1(avg / unit.max(1) as f64)),
            }
        })
        .collect();

    let daily = per_day
        .iter()
        .map(|(date, amount)| DailyPoint {
            date: *date,
            amount: *amount,
            display_amount: display_amount(*amount, unit),
        })
        .collect();

    let day_of_week = WEEKDAYS
        .iter()
        .zip(per_weekday)
        .map(|(label, amount)| WeekdayShare {
            weekday: *label,
            amount,
            display_amount: display_amount(amount, unit),
            percentage: percentage(amount, total),
        })
        .collect();

    let tri_decade = TRI_DECADES
        .iter()
        .zip(per_decade)
        .map(|(label, (record_count, amount))| TriDecadeShare {
            label: *label,
            record_count,
            amount,
            display_amount: display_amount(amount, unit),
            percentage: percentage(amount, total),
        })
        .collect();

    let current = YearMonth::of(input.today);
    let landing = per_month.contains_key(&current).then(|| {
        let month_to_date: i64 = per_day
            .range(current.first_day()..=input.today)
            .map(|(_, amount)| amount)
            .sum();
        project_landing(current, input.today, month_to_date, input.current_month_target, unit)
    });

    Ok(SalesReport {
        start_month: input.start.to_string(),
        end_month: input.end.to_string(),
        total,
        display_total: display_amount(total, unit),
        record_count: records.len(),
        monthly,
        daily,
        day_of_week,
        tri_decade,
        landing,
    })
}

/// 0 for days 1-10, 1 for 11-20, 2 for the rest of the month.
pub fn tri_decade_index(day: u32) -> usize {
    match day {
        0..=10 => 0,
        11..=20 => 1,
        _ => 2,
    }
}

fn moving_average(amounts: &[i64], i: usize) -> Option<f64> {
    if i < 2 || i >= amounts.len() {
        return None;
    }
    let window = &amounts[i - 2..=i];
    Some(window.iter().sum::<i64>() as f64 / 3.0)
}

fn project_landing(
    month: YearMonth,
    today: NaiveDate,
    month_to_date: i64,
    target: Option<i64>,
    unit: i64,
) -> LandingProjection {
    let days_in_month = month.days_in_month();
    let elapsed_days = today.day();
    let days_remaining = days_in_month - elapsed_days;
    let daily_average = month_to_date as f64 / elapsed_days as f64;
    let landing = month_to_date + (days_remaining as f64 * daily_average).round() as i64;
    let target = target.filter(|t| *t > 0);

    LandingProjection {
        month: month.to_string(),
        month_to_date,
        elapsed_days,
        days_in_month,
        days_remaining,
        daily_average: round1(daily_average),
        landing,
        display_landing: display_amount(landing, unit),
        target,
        achievement_rate: target.map(|t| percentage(landing, t)),
    }
}
