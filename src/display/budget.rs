//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::BudgetList;
use crate::models::Budget;
use crate::reports::MonthBudgets;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Budget> for BudgetRow {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id.clone(),
            category: budget.category_label().to_string(),
            month: budget.month.to_string(),
            amount: budget.amount.to_string(),
        }
    }
}

fn budget_table<'b>(budgets: impl IntoIterator<Item = &'b Budget>) -> String {
    let mut table = Table::new(budgets.into_iter().map(BudgetRow::from));
    table.with(Style::rounded());
    table.to_string()
}

/// Format one month's budgets as a table
pub fn format_budget_list(list: &BudgetList) -> String {
    if list.budgets.is_empty() {
        return "No budgets set for this month.\n".to_string();
    }
    format!("{}\nTotal Budget: {}\n", budget_table(&list.budgets), list.total_budget)
}

/// Format budgets grouped by month, newest first
pub fn format_budget_settings(groups: &[MonthBudgets]) -> String {
    if groups.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("{}\n", group.month.label()));
        output.push_str(&budget_table(&group.budgets));
        output.push_str(&format!("\nTotal Budget: {}\n\n", group.total));
    }
    output
}
