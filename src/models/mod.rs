//! Core data models for fintrack
//!
//! Request-scoped copies of backend data: expenses, budgets, monthly
//! summaries and reports, plus the money, month and category value types.

pub mod budget;
pub mod category;
pub mod expense;
pub mod money;
pub mod month;
pub mod summary;

pub use budget::{Budget, NewBudget};
pub use category::Category;
pub use expense::{Expense, ExpenseUpdate, NewExpense};
pub use money::Money;
pub use month::MonthKey;
pub use summary::{
    BudgetStatus, CategoryBreakdown, CategoryTotals, HealthStatus, Report, SummaryRecord,
    TopCategory,
};
