//! Display formatting for terminal output
//!
//! Tables for expenses and budgets plus the small text helpers shared by
//! the CLI reports.

pub mod budget;
pub mod expense;
pub mod format;

pub use budget::{format_budget_list, format_budget_settings};
pub use expense::{format_expense_details, format_expense_list};
pub use format::{format_bar, format_percentage};
