//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::truncate;
use crate::api::ExpenseList;
use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.to_string(),
            amount: expense.amount.to_string(),
            note: truncate(expense.note.as_deref().unwrap_or(""), 30),
        }
    }
}

/// Format a month's expenses as a table with a total line
pub fn format_expense_list(list: &ExpenseList) -> String {
    if list.expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut expenses: Vec<&Expense> = list.expenses.iter().collect();
    expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table = Table::new(expenses.into_iter().map(ExpenseRow::from));
    table.with(Style::rounded());

    format!(
        "{}\n{} expenses, total {}\n",
        table,
        list.expenses.len(),
        list.total()
    )
}

/// Format one expense for display
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Date:     {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:   {}\n", expense.amount));
    output.push_str(&format!("Category: {}\n", expense.category));
    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:     {}\n", note));
    }
    output
}
