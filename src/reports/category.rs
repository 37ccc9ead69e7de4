//! Per-category spending bars
//!
//! Turns a month's category breakdown into the rows drawn as gauges on the
//! dashboard and as variance bars on the reports page.

use serde::Serialize;

use crate::models::{CategoryBreakdown, CategoryTotals, Money};

/// Fraction of the budget consumed, capped at 1
///
/// A zero or negative budget gives 0.
pub fn fill_ratio(total: Money, budget: Money) -> f64 {
    if !budget.is_positive() {
        return 0.0;
    }
    (total.cents() as f64 / budget.cents() as f64).clamp(0.0, 1.0)
}

/// One category's spending against its budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    pub name: String,
    pub total: Money,
    pub budget: Money,
    pub count: u32,
    /// Share of the month's spending, 0-100
    pub percentage: f64,
    pub over_budget: bool,
    pub fill: f64,
}

impl CategoryBar {
    pub fn new(name: impl Into<String>, totals: &CategoryTotals) -> Self {
        Self {
            name: name.into(),
            total: totals.total_amount,
            budget: totals.budget,
            count: totals.count,
            percentage: totals.percentage,
            over_budget: totals.budget.is_positive() && totals.total_amount > totals.budget,
            fill: fill_ratio(totals.total_amount, totals.budget),
        }
    }

    pub fn has_budget(&self) -> bool {
        self.budget.is_positive()
    }

    /// Amount spent beyond the budget, zero when within it
    pub fn overspend(&self) -> Money {
        if self.over_budget {
            self.total - self.budget
        } else {
            Money::zero()
        }
    }

    /// Dashboard caption: "$X over budget" or "$Y remaining"
    pub fn remaining_label(&self) -> String {
        if !self.has_budget() {
            "No budget set".to_string()
        } else if self.over_budget {
            format!("{} over budget", self.overspend())
        } else {
            format!("{} remaining", self.budget - self.total)
        }
    }

    /// Reports caption: "$X over budget" or "$Y under budget"
    pub fn variance_label(&self) -> String {
        if !self.has_budget() {
            "No budget set".to_string()
        } else if self.over_budget {
            format!("{} over budget", self.overspend())
        } else {
            format!("{} under budget", self.budget - self.total)
        }
    }
}

/// Bars for every category in the breakdown, in breakdown order
pub fn category_bars(breakdown: &CategoryBreakdown) -> Vec<CategoryBar> {
    breakdown
        .iter()
        .map(|(name, totals)| CategoryBar::new(name.clone(), totals))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total: i64, budget: i64) -> CategoryTotals {
        CategoryTotals::new(Money::from_cents(total), Money::from_cents(budget), 1)
    }

    #[test]
    fn test_fill_ratio() {
        assert_eq!(fill_ratio(Money::from_cents(5000), Money::from_cents(10000)), 0.5);
        assert_eq!(fill_ratio(Money::from_cents(85050), Money::from_cents(80000)), 1.0);
        assert_eq!(fill_ratio(Money::from_cents(5000), Money::zero()), 0.0);
    }

    #[test]
    fn test_over_budget_bar() {
        let bar = CategoryBar::new("Food", &totals(85050, 80000));
        assert!(bar.over_budget);
        assert_eq!(bar.fill, 1.0);
        assert_eq!(bar.remaining_label(), "$50.50 over budget");
        assert_eq!(bar.variance_label(), "$50.50 over budget");
        assert_eq!(bar.overspend(), Money::from_cents(5050));
    }

    #[test]
    fn test_under_budget_bar() {
        let bar = CategoryBar::new("Travel", &totals(2500, 10000));
        assert!(!bar.over_budget);
        assert_eq!(bar.fill, 0.25);
        assert_eq!(bar.remaining_label(), "$75.00 remaining");
        assert_eq!(bar.variance_label(), "$75.00 under budget");
    }

    #[test]
    fn test_unbudgeted_bar() {
        let bar = CategoryBar::new("Other", &totals(2500, 0));
        assert!(!bar.over_budget);
        assert_eq!(bar.fill, 0.0);
        assert_eq!(bar.remaining_label(), "No budget set");
    }

    #[test]
    fn test_backend_flag_is_recomputed() {
        let mut stale = totals(100, 0);
        stale.over_budget = true;
        let bar = CategoryBar::new("Other", &stale);
        assert!(!bar.over_budget);
    }

    #[test]
    fn test_category_bars_keep_order() {
        let breakdown: CategoryBreakdown = vec![
            ("Travel".to_string(), totals(100, 0)),
            ("Food & Dining".to_string(), totals(200, 100)),
        ]
        .into_iter()
        .collect();
        let bars = category_bars(&breakdown);
        let names: Vec<&str> = bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Food & Dining", "Travel"]);
    }
}
