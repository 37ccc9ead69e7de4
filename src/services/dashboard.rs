//! Month overview loading
//!
//! The dashboard and the reports page both need the month's summary and its
//! per-category report; this service fetches the pair.

use crate::api::ApiClient;
use crate::error::TrackerResult;
use crate::models::{MonthKey, Report, SummaryRecord};

/// Summary and report for one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthOverview {
    pub month: MonthKey,
    pub summary: SummaryRecord,
    pub report: Report,
}

/// Service for month-level aggregates
pub struct DashboardService<'a> {
    api: &'a ApiClient,
    user_id: &'a str,
}

impl<'a> DashboardService<'a> {
    pub fn new(api: &'a ApiClient, user_id: &'a str) -> Self {
        Self { api, user_id }
    }

    pub fn summary(&self, month: &MonthKey) -> TrackerResult<SummaryRecord> {
        self.api.get_summary(self.user_id, month).into_result()
    }

    pub fn report(&self, month: &MonthKey) -> TrackerResult<Report> {
        self.api.get_report(self.user_id, month).into_result()
    }

    /// Fetch summary then report; the first failure wins
    pub fn overview(&self, month: &MonthKey) -> TrackerResult<MonthOverview> {
        let summary = self.summary(month)?;
        let report = self.report(month)?;
        Ok(MonthOverview {
            month: month.clone(),
            summary,
            report,
        })
    }
}
