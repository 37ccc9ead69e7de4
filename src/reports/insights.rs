//! Spending insights for the reports page

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::category::{category_bars, CategoryBar};
use super::status::{AlertKind, StatusAlert, UsageLevel};
use crate::models::{Money, MonthKey, Report, SummaryRecord, TopCategory};

/// Derived figures shown above the category variance bars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingInsights {
    pub top_category: Option<TopCategory>,
    pub average_daily: Money,
    /// Days counted for the average
    pub days_elapsed: u32,
    pub budget_utilization: f64,
    pub over_budget_categories: usize,
    pub total_overspend: Money,
}

impl SpendingInsights {
    /// Compute insights for `month` as seen on `today`
    pub fn compute(
        month: &MonthKey,
        summary: &SummaryRecord,
        report: &Report,
        today: NaiveDate,
    ) -> Self {
        let bars = category_bars(&report.expenses_by_category);
        let days_elapsed = days_elapsed(month, today);
        let average_daily = if days_elapsed == 0 {
            Money::zero()
        } else {
            Money::from_cents(
                (summary.total_expenses.cents() as f64 / days_elapsed as f64).round() as i64,
            )
        };

        Self {
            top_category: report
                .top_spending_category
                .clone()
                .or_else(|| top_from_bars(&bars)),
            average_daily,
            days_elapsed,
            budget_utilization: summary.budget_usage_percent,
            over_budget_categories: bars.iter().filter(|b| b.over_budget).count(),
            total_overspend: bars.iter().map(CategoryBar::overspend).sum(),
        }
    }

    pub fn utilization_level(&self) -> UsageLevel {
        UsageLevel::from_percent(self.budget_utilization)
    }

    /// The banner shown on the reports page
    pub fn alert(&self) -> StatusAlert {
        if self.over_budget_categories > 0 {
            StatusAlert::new(
                AlertKind::Warning,
                format!(
                    "You exceeded budget in {} categories with total overspend of {}",
                    self.over_budget_categories, self.total_overspend
                ),
            )
        } else {
            StatusAlert::new(
                AlertKind::Success,
                "Excellent! You stayed within budget across all categories this month.",
            )
        }
    }
}

/// Days of `month` that have passed as of `today`
///
/// Past months count in full, the current month up to today, future months
/// not at all.
pub fn days_elapsed(month: &MonthKey, today: NaiveDate) -> u32 {
    let current = MonthKey::from_date(today);
    if month < &current {
        month.days()
    } else if month == &current {
        today.day()
    } else {
        0
    }
}

fn top_from_bars(bars: &[CategoryBar]) -> Option<TopCategory> {
    bars.iter()
        .filter(|b| b.total.is_positive())
        .max_by_key(|b| b.total)
        .map(|b| TopCategory {
            category: b.name.clone(),
            amount: b.total,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryTotals;

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report_with(entries: &[(&str, i64, i64)]) -> Report {
        Report {
            expenses_by_category: entries
                .iter()
                .map(|(name, total, budget)| {
                    (
                        name.to_string(),
                        CategoryTotals::new(
                            Money::from_cents(*total),
                            Money::from_cents(*budget),
                            1,
                        ),
                    )
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_days_elapsed() {
        assert_eq!(days_elapsed(&month("2024-02"), date(2024, 5, 10)), 29);
        assert_eq!(days_elapsed(&month("2024-05"), date(2024, 5, 10)), 10);
        assert_eq!(days_elapsed(&month("2024-06"), date(2024, 5, 10)), 0);
    }

    #[test]
    fn test_over_budget_insights() {
        let report = report_with(&[("Food & Dining", 85050, 80000), ("Travel", 30000, 20000)]);
        let summary = SummaryRecord::from_totals(
            Money::from_cents(115050),
            Money::from_cents(100000),
            2,
            2,
        );
        let insights = SpendingInsights::compute(&month("2024-01"), &summary, &report, date(2024, 3, 1));

        assert_eq!(insights.days_elapsed, 31);
        assert_eq!(insights.average_daily, Money::from_cents(3711));
        assert_eq!(insights.over_budget_categories, 2);
        assert_eq!(insights.total_overspend, Money::from_cents(15050));
        assert_eq!(insights.top_category.as_ref().unwrap().category, "Food & Dining");
        assert_eq!(
            insights.alert().message,
            "You exceeded budget in 2 categories with total overspend of $150.50"
        );
        assert_eq!(insights.utilization_level(), UsageLevel::High);
    }

    #[test]
    fn test_within_budget_insights() {
        let report = report_with(&[("Utilities", 5000, 10000)]);
        let summary =
            SummaryRecord::from_totals(Money::from_cents(5000), Money::from_cents(10000), 1, 1);
        let insights = SpendingInsights::compute(&month("2024-01"), &summary, &report, date(2024, 1, 10));

        assert_eq!(insights.average_daily, Money::from_cents(500));
        assert_eq!(insights.alert().kind, AlertKind::Success);
        assert_eq!(
            insights.alert().message,
            "Excellent! You stayed within budget across all categories this month."
        );
    }

    #[test]
    fn test_empty_month() {
        let summary = SummaryRecord::from_totals(Money::zero(), Money::zero(), 0, 0);
        let insights =
            SpendingInsights::compute(&month("2024-07"), &summary, &Report::default(), date(2024, 1, 1));
        assert!(insights.top_category.is_none());
        assert_eq!(insights.average_daily, Money::zero());
        assert_eq!(insights.total_overspend, Money::zero());
    }
}
