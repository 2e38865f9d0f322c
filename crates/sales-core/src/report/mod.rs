//! Derived sales figures: dashboard ranking and the period report.

pub mod aggregation;
pub mod dashboard;

pub use aggregation::{
    build_report, DailyPoint, LandingProjection, MonthlyPoint, ReportInput, SalesReport, TriDecadeShare,
    WeekdayShare,
};
pub use dashboard::{build_dashboard, CumulativePoint, DashboardInput, DashboardSummary, MemberSummary};

/// Convert a base-unit amount to the display unit, one decimal.
pub fn display_amount(amount: i64, amount_unit: i64) -> f64 {
    if amount_unit <= 0 {
        return amount as f64;
    }
    round1(amount as f64 / amount_unit as f64)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, one decimal; zero when `whole` is zero.
pub(crate) fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}
