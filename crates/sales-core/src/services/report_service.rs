//! Dashboard summary and period report

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Period, SalesFilter, SalesRecord, YearMonth};
use crate::error::DomainError;
use crate::report::{build_dashboard, build_report, DashboardInput, DashboardSummary, ReportInput, SalesReport};
use crate::repositories::{GroupRepository, MemberRepository, SalesRecordRepository, TargetRepository};

#[derive(Debug, Clone, Copy)]
pub struct DashboardQuery {
    pub period: Period,
    pub anchor: YearMonth,
    pub group_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportQuery {
    pub start: YearMonth,
    pub end: YearMonth,
    pub member_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
}

/// Longest range a single report may cover.
const MAX_REPORT_MONTHS: usize = 36;

pub struct ReportService {
    records: Arc<dyn SalesRecordRepository>,
    members: Arc<dyn MemberRepository>,
    groups: Arc<dyn GroupRepository>,
    targets: Arc<dyn TargetRepository>,
    amount_unit: i64,
}

impl ReportService {
    pub fn new(
        records: Arc<dyn SalesRecordRepository>,
        members: Arc<dyn MemberRepository>,
        groups: Arc<dyn GroupRepository>,
        targets: Arc<dyn TargetRepository>,
        amount_unit: i64,
    ) -> Self {
        Self {
            records,
            members,
            groups,
            targets,
            amount_unit,
        }
    }

    pub async fn dashboard(&self, tenant_id: Uuid, query: DashboardQuery) -> Result<DashboardSummary, DomainError> {
        let range = query.period.range(query.anchor);
        let mut members = self.members.list(tenant_id, true).await?;
        let group_members = self.group_member_ids(tenant_id, query.group_id).await?;
        if let Some(ids) = &group_members {
            members.retain(|m| ids.contains(&m.id));
        }

        let filter = SalesFilter {
            start_date: Some(range.start),
            end_date: Some(range.end),
            member_ids: group_members.map(|ids| ids.into_iter().collect()),
        };
        let records = self.records_for(tenant_id, &filter).await?;
        let targets = self.targets.list_for_year(tenant_id, query.anchor.year).await?;

        Ok(build_dashboard(DashboardInput {
            members: &members,
            records: &records,
            targets: &targets,
            period: query.period,
            anchor: query.anchor,
            amount_unit: self.amount_unit,
        }))
    }

    pub async fn report(&self, tenant_id: Uuid, query: ReportQuery, today: NaiveDate) -> Result<SalesReport, DomainError> {
        let months = query.start.through(query.end);
        if months.is_empty() {
            return Err(DomainError::validation("start month must not be after end month"));
        }
        if months.len() > MAX_REPORT_MONTHS {
            return Err(DomainError::validation(format!(
                "Reports may span at most {} months",
                MAX_REPORT_MONTHS
            )));
        }

        let member_ids: Option<HashSet<Uuid>> = match (query.member_id, query.group_id) {
            (Some(member_id), _) => {
                self.members
                    .find_by_id(tenant_id, member_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Member"))?;
                Some(HashSet::from([member_id]))
            }
            (None, group_id) => self.group_member_ids(tenant_id, group_id).await?,
        };

        let filter = SalesFilter {
            start_date: Some(query.start.first_day()),
            end_date: Some(query.end.last_day()),
            member_ids: member_ids.as_ref().map(|ids| ids.iter().copied().collect()),
        };
        let records = self.records_for(tenant_id, &filter).await?;

        let current = YearMonth::of(today);
        let current_month_target = if months.contains(&current) {
            let targets = self.targets.list_for_month(tenant_id, current).await?;
            let sum: i64 = targets
                .iter()
                .filter(|t| member_ids.as_ref().map_or(true, |ids| ids.contains(&t.member_id)))
                .map(|t| t.monthly)
                .sum();
            Some(sum)
        } else {
            None
        };

        build_report(ReportInput {
            records: &records,
            start: query.start,
            end: query.end,
            today,
            current_month_target,
            amount_unit: self.amount_unit,
        })
    }

    async fn group_member_ids(&self, tenant_id: Uuid, group_id: Option<Uuid>) -> Result<Option<HashSet<Uuid>>, DomainError> {
        let Some(group_id) = group_id else {
            return Ok(None);
        };
        self.groups
            .find_by_id(tenant_id, group_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Group"))?;
        let ids = self.groups.member_ids(tenant_id, group_id).await?;
        Ok(Some(ids.into_iter().collect()))
    }

    async fn records_for(&self, tenant_id: Uuid, filter: &SalesFilter) -> Result<Vec<SalesRecord>, DomainError> {
        Ok(self
            .records
            .list_all(tenant_id, filter)
            .await?
            .into_iter()
            .map(|r| r.record)
            .collect())
    }
}
