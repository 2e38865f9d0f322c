//! Sales target domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::{Period, YearMonth};
use crate::error::DomainError;

/// Goal figures for one member in one calendar month (base currency units).
/// `quarterly` is read from a quarter's first month and `annual` from January.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Target {
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub monthly: i64,
    pub quarterly: i64,
    pub annual: i64,
    pub updated_at: DateTime<Utc>,
}

impl Target {
    pub fn new(
        tenant_id: Uuid,
        member_id: Uuid,
        year_month: YearMonth,
        monthly: i64,
        quarterly: i64,
        annual: i64,
    ) -> Result<Self, DomainError> {
        if monthly < 0 || quarterly < 0 || annual < 0 {
            return Err(DomainError::validation("Targets must not be negative"));
        }
        Ok(Self {
            tenant_id,
            member_id,
            year: year_month.year,
            month: year_month.month,
            monthly,
            quarterly,
            annual,
            updated_at: Utc::now(),
        })
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Resolve a member's target for `period` around `anchor`.
///
/// Explicit quarterly/annual figures win when positive; otherwise the
/// monthly figures of the covered months are summed.
pub fn period_target(targets: &[Target], member_id: Uuid, period: Period, anchor: YearMonth) -> i64 {
    let months = period.months(anchor);
    let find = |ym: YearMonth| {
        targets
            .iter()
            .find(|t| t.member_id == member_id && t.year_month() == ym)
    };
    let monthly_sum = || -> i64 { months.iter().filter_map(|ym| find(*ym)).map(|t| t.monthly).sum() };

    match period {
        Period::Monthly => find(anchor).map(|t| t.monthly).unwrap_or(0),
        Period::Quarterly => match find(months[0]) {
            Some(t) if t.quarterly > 0 => t.quarterly,
            _ => monthly_sum(),
        },
        Period::Annual => match find(months[0]) {
            Some(t) if t.annual > 0 => t.annual,
            _ => monthly_sum(),
        },
    }
}

/// Achievement percentage rounded to one decimal; `None` without a target.
pub fn achievement_rate(actual: i64, target: i64) -> Option<f64> {
    if target <= 0 {
        return None;
    }
    Some((actual as f64 / target as f64 * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(member_id: Uuid, month: u32, monthly: i64, quarterly: i64, annual: i64) -> Target {
        Target::new(
            Uuid::nil(),
            member_id,
            YearMonth::new(2024, month).unwrap(),
            monthly,
            quarterly,
            annual,
        )
        .unwrap()
    }

    #[test]
    fn test_monthly_target() {
        let m = Uuid::new_v4();
        let targets = vec![target(m, 4, 100, 0, 0), target(m, 5, 200, 0, 0)];
        let anchor = YearMonth::new(2024, 5).unwrap();
        assert_eq!(period_target(&targets, m, Period::Monthly, anchor), 200);
        assert_eq!(period_target(&targets, Uuid::new_v4(), Period::Monthly, anchor), 0);
    }

    #[test]
    fn test_quarterly_prefers_explicit_value() {
        let m = Uuid::new_v4();
        let anchor = YearMonth::new(2024, 5).unwrap();

        let summed = vec![target(m, 4, 100, 0, 0), target(m, 5, 200, 0, 0), target(m, 6, 300, 0, 0)];
        assert_eq!(period_target(&summed, m, Period::Quarterly, anchor), 600);

        let explicit = vec![target(m, 4, 100, 1000, 0), target(m, 5, 200, 0, 0)];
        assert_eq!(period_target(&explicit, m, Period::Quarterly, anchor), 1000);
    }

    #[test]
    fn test_annual_target() {
        let m = Uuid::new_v4();
        let anchor = YearMonth::new(2024, 9).unwrap();
        let targets = vec![target(m, 1, 10, 0, 5000), target(m, 9, 10, 0, 0)];
        assert_eq!(period_target(&targets, m, Period::Annual, anchor), 5000);

        let targets = vec![target(m, 1, 10, 0, 0), target(m, 9, 15, 0, 0)];
        assert_eq!(period_target(&targets, m, Period::Annual, anchor), 25);
    }

    #[test]
    fn test_negative_rejected() {
        let result = Target::new(Uuid::nil(), Uuid::nil(), YearMonth::new(2024, 1).unwrap(), -1, 0, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_achievement_rate() {
        assert_eq!(achievement_rate(50, 200), Some(25.0));
        assert_eq!(achievement_rate(1, 3), Some(33.3));
        assert_eq!(achievement_rate(10, 0), None);
    }
}
