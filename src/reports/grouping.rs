//! Grouping budgets by month for the settings view

use serde::Serialize;

use crate::models::{Budget, Money, MonthKey};

/// All budgets of one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBudgets {
    pub month: MonthKey,
    pub budgets: Vec<Budget>,
    pub total: Money,
}

/// Group budgets by month, newest month first
///
/// Within a month budgets keep their input order.
pub fn group_budgets_by_month(budgets: &[Budget]) -> Vec<MonthBudgets> {
    let mut groups: Vec<MonthBudgets> = Vec::new();

    for budget in budgets {
        match groups.iter_mut().find(|g| g.month == budget.month) {
            Some(group) => {
                group.total += budget.amount;
                group.budgets.push(budget.clone());
            }
            None => groups.push(MonthBudgets {
                month: budget.month.clone(),
                budgets: vec![budget.clone()],
                total: budget.amount,
            }),
        }
    }

    groups.sort_by(|a, b| b.month.cmp(&a.month));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn budget(id: &str, month: &str, cents: i64) -> Budget {
        Budget {
            id: id.into(),
            category: Some(Category::Other),
            amount: Money::from_cents(cents),
            month: MonthKey::parse(month).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_groups_sorted_descending() {
        let budgets = vec![
            budget("a", "2024-03", 100),
            budget("b", "2024-01", 200),
            budget("c", "2024-12", 300),
            budget("d", "2024-03", 400),
        ];
        let groups = group_budgets_by_month(&budgets);
        let months: Vec<&str> = groups.iter().map(|g| g.month.as_str()).collect();
        assert_eq!(months, vec!["2024-12", "2024-03", "2024-01"]);

        let march = &groups[1];
        assert_eq!(march.total, Money::from_cents(500));
        let ids: Vec<&str> = march.budgets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_budgets_by_month(&[]).is_empty());
    }
}
