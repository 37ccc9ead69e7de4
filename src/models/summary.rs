//! Monthly summary and report models
//!
//! These mirror what the backend computes for a month. The client treats
//! them as read-only inputs to the aggregation logic in `reports`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::money::Money;
use super::month::MonthKey;

/// Overall budget standing for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    NoBudget,
    UnderBudget,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::NoBudget => "no_budget",
            BudgetStatus::UnderBudget => "under_budget",
            BudgetStatus::OverBudget => "over_budget",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,
    pub total_expenses: Money,
    pub total_budget: Money,
    pub remaining_budget: Money,
    #[serde(default)]
    pub budget_usage_percent: f64,
    #[serde(default = "default_status")]
    pub budget_status: BudgetStatus,
    #[serde(default)]
    pub expense_count: u32,
    #[serde(default)]
    pub budget_count: u32,
}

fn default_status() -> BudgetStatus {
    BudgetStatus::NoBudget
}

impl SummaryRecord {
    /// Build a summary from raw totals, deriving the remaining amount, the
    /// usage percentage and the status the same way the backend does
    pub fn from_totals(
        total_expenses: Money,
        total_budget: Money,
        expense_count: u32,
        budget_count: u32,
    ) -> Self {
        let remaining_budget = total_budget - total_expenses;
        let budget_usage_percent = if total_budget.is_positive() {
            total_expenses.cents() as f64 / total_budget.cents() as f64 * 100.0
        } else {
            0.0
        };
        let budget_status = if budget_count == 0 {
            BudgetStatus::NoBudget
        } else if remaining_budget.is_negative() {
            BudgetStatus::OverBudget
        } else {
            BudgetStatus::UnderBudget
        };

        Self {
            month: None,
            total_expenses,
            total_budget,
            remaining_budget,
            budget_usage_percent,
            budget_status,
            expense_count,
            budget_count,
        }
    }
}

/// Spending in one category for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total_amount: Money,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub budget: Money,
    #[serde(default)]
    pub over_budget: bool,
    /// Share of the month's total spending, 0-100
    #[serde(default)]
    pub percentage: f64,
}

impl CategoryTotals {
    pub fn new(total_amount: Money, budget: Money, count: u32) -> Self {
        Self {
            total_amount,
            count,
            budget,
            over_budget: budget.is_positive() && total_amount > budget,
            percentage: 0.0,
        }
    }
}

/// Category name to totals, ordered by name
pub type CategoryBreakdown = BTreeMap<String, CategoryTotals>;

/// The category with the largest spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: Money,
}

/// Per-category report for a month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,
    #[serde(default)]
    pub expenses_by_category: CategoryBreakdown,
    #[serde(default)]
    pub top_spending_category: Option<TopCategory>,
    #[serde(default)]
    pub over_budget_categories_count: u32,
    #[serde(default)]
    pub total_expenses: Money,
    #[serde(default)]
    pub total_categories: u32,
}

/// Backend health probe result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_totals_over_budget() {
        let summary =
            SummaryRecord::from_totals(Money::from_cents(90000), Money::from_cents(80000), 5, 3);
        assert_eq!(summary.remaining_budget, Money::from_cents(-10000));
        assert!((summary.budget_usage_percent - 112.5).abs() < 1e-9);
        assert_eq!(summary.budget_status, BudgetStatus::OverBudget);
    }

    #[test]
    fn test_from_totals_zero_budget() {
        let summary = SummaryRecord::from_totals(Money::from_cents(5000), Money::zero(), 1, 0);
        assert_eq!(summary.budget_usage_percent, 0.0);
        assert_eq!(summary.budget_status, BudgetStatus::NoBudget);
    }

    #[test]
    fn test_deserialize_backend_summary() {
        let json = r#"{
            "month": "2024-01",
            "total_expenses": 900.0,
            "total_budget": 800,
            "remaining_budget": -100.0,
            "budget_usage_percent": 112.5,
            "budget_status": "over_budget",
            "expense_count": 5,
            "budget_count": 3
        }"#;
        let summary: SummaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(summary.month.unwrap().as_str(), "2024-01");
        assert_eq!(summary.remaining_budget.to_string(), "-$100.00");
        assert_eq!(summary.budget_status, BudgetStatus::OverBudget);
    }

    #[test]
    fn test_deserialize_backend_report() {
        let json = r#"{
            "month": "2024-01",
            "expenses_by_category": {
                "Food & Dining": {"total_amount": 850.5, "count": 4, "budget": 800, "over_budget": true, "percentage": 85.05},
                "Travel": {"total_amount": 149.5, "count": 1, "budget": 0, "over_budget": false, "percentage": 14.95}
            },
            "top_spending_category": {"category": "Food & Dining", "amount": 850.5},
            "over_budget_categories_count": 1,
            "total_expenses": 1000.0,
            "total_categories": 2
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.expenses_by_category.len(), 2);
        let keys: Vec<&String> = report.expenses_by_category.keys().collect();
        assert_eq!(keys, vec!["Food & Dining", "Travel"]);
        assert_eq!(report.top_spending_category.unwrap().amount, Money::from_cents(85050));
    }

    #[test]
    fn test_empty_report_has_null_top_category() {
        let json = r#"{"month":"2024-02","expenses_by_category":{},"top_spending_category":null,
            "over_budget_categories_count":0,"total_expenses":0,"total_categories":0}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert!(report.expenses_by_category.is_empty());
        assert!(report.top_spending_category.is_none());
    }

    #[test]
    fn test_category_totals_over_flag() {
        assert!(CategoryTotals::new(Money::from_cents(85050), Money::from_cents(80000), 1).over_budget);
        assert!(!CategoryTotals::new(Money::from_cents(85050), Money::zero(), 1).over_budget);
        assert!(!CategoryTotals::new(Money::from_cents(80000), Money::from_cents(80000), 1).over_budget);
    }
}
