//! Budget status classification and the dashboard alert

use serde::Serialize;

use crate::models::{BudgetStatus, CategoryBreakdown, SummaryRecord};

/// Severity of an alert banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Success,
}

/// A status banner: severity plus the sentence shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusAlert {
    pub kind: AlertKind,
    pub message: String,
}

impl StatusAlert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Classify a month from its summary
///
/// A month with no budgets is `NoBudget` whatever it spent; otherwise a
/// negative remaining amount means `OverBudget`.
pub fn classify(summary: &SummaryRecord) -> BudgetStatus {
    if summary.budget_count == 0 {
        BudgetStatus::NoBudget
    } else if summary.remaining_budget.is_negative() {
        BudgetStatus::OverBudget
    } else {
        BudgetStatus::UnderBudget
    }
}

/// Number of categories whose spend exceeds a positive budget
pub fn over_budget_count(breakdown: &CategoryBreakdown) -> usize {
    breakdown
        .values()
        .filter(|t| t.budget.is_positive() && t.total_amount > t.budget)
        .count()
}

/// The dashboard banner for a month
///
/// `None` means the summary has not arrived yet.
pub fn budget_status_message(
    summary: Option<&SummaryRecord>,
    breakdown: &CategoryBreakdown,
) -> StatusAlert {
    let Some(summary) = summary else {
        return StatusAlert::new(AlertKind::Info, "Loading...");
    };

    match classify(summary) {
        BudgetStatus::NoBudget => StatusAlert::new(
            AlertKind::Warning,
            "No budgets set for this month. Set up your budgets to track spending.",
        ),
        BudgetStatus::OverBudget => StatusAlert::new(
            AlertKind::Warning,
            format!(
                "You're over budget by {}. {} categories exceeded their limits.",
                summary.remaining_budget.abs(),
                over_budget_count(breakdown)
            ),
        ),
        BudgetStatus::UnderBudget => StatusAlert::new(
            AlertKind::Success,
            format!(
                "Great job! You have {} remaining in your budget.",
                summary.remaining_budget
            ),
        ),
    }
}

/// How close spending is to the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Normal,
    Elevated,
    High,
}

impl UsageLevel {
    /// Above 90% is high, above 75% elevated
    pub fn from_percent(percent: f64) -> Self {
        if percent > 90.0 {
            UsageLevel::High
        } else if percent > 75.0 {
            UsageLevel::Elevated
        } else {
            UsageLevel::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTotals, Money};

    fn summary(expenses: i64, budget: i64, expense_count: u32, budget_count: u32) -> SummaryRecord {
        SummaryRecord::from_totals(
            Money::from_cents(expenses),
            Money::from_cents(budget),
            expense_count,
            budget_count,
        )
    }

    fn breakdown(entries: &[(&str, i64, i64)]) -> CategoryBreakdown {
        entries
            .iter()
            .map(|(name, total, budget)| {
                (
                    name.to_string(),
                    CategoryTotals::new(Money::from_cents(*total), Money::from_cents(*budget), 1),
                )
            })
            .collect()
    }

    #[test]
    fn test_loading_without_summary() {
        let alert = budget_status_message(None, &CategoryBreakdown::new());
        assert_eq!(alert, StatusAlert::new(AlertKind::Info, "Loading..."));
    }

    #[test]
    fn test_no_budgets() {
        let s = summary(5000, 0, 2, 0);
        assert_eq!(classify(&s), BudgetStatus::NoBudget);
        let alert = budget_status_message(Some(&s), &CategoryBreakdown::new());
        assert_eq!(alert.kind, AlertKind::Warning);
        assert_eq!(
            alert.message,
            "No budgets set for this month. Set up your budgets to track spending."
        );
    }

    #[test]
    fn test_over_budget_message() {
        let s = summary(90000, 80000, 5, 3);
        assert_eq!(classify(&s), BudgetStatus::OverBudget);
        let b = breakdown(&[("Food & Dining", 85050, 80000), ("Travel", 4950, 0)]);
        let alert = budget_status_message(Some(&s), &b);
        assert_eq!(alert.kind, AlertKind::Warning);
        assert_eq!(
            alert.message,
            "You're over budget by $100.00. 1 categories exceeded their limits."
        );
    }

    #[test]
    fn test_under_budget_message() {
        let s = summary(0, 50000, 0, 1);
        assert_eq!(classify(&s), BudgetStatus::UnderBudget);
        assert_eq!(s.budget_usage_percent, 0.0);
        let alert = budget_status_message(Some(&s), &CategoryBreakdown::new());
        assert_eq!(alert.kind, AlertKind::Success);
        assert_eq!(alert.message, "Great job! You have $500.00 remaining in your budget.");
    }

    #[test]
    fn test_exactly_on_budget_is_under() {
        let s = summary(80000, 80000, 3, 1);
        assert_eq!(classify(&s), BudgetStatus::UnderBudget);
    }

    #[test]
    fn test_over_count_ignores_unbudgeted() {
        let b = breakdown(&[("A", 100, 0), ("B", 200, 100), ("C", 100, 100)]);
        assert_eq!(over_budget_count(&b), 1);
    }

    #[test]
    fn test_usage_level() {
        assert_eq!(UsageLevel::from_percent(95.0), UsageLevel::High);
        assert_eq!(UsageLevel::from_percent(90.0), UsageLevel::Elevated);
        assert_eq!(UsageLevel::from_percent(75.0), UsageLevel::Normal);
    }
}
