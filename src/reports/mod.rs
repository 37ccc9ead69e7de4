//! Reports module for the finance tracker
//!
//! Derives everything the dashboard and reports screens display from a
//! month's summary and category breakdown: budget status, category bars,
//! spending insights and the month-grouped budget list.

pub mod category;
pub mod grouping;
pub mod insights;
pub mod monthly;
pub mod status;

pub use category::{category_bars, fill_ratio, CategoryBar};
pub use grouping::{group_budgets_by_month, MonthBudgets};
pub use insights::{days_elapsed, SpendingInsights};
pub use monthly::{summary_cards, MonthlyReport, SummaryCard};
pub use status::{
    budget_status_message, classify, over_budget_count, AlertKind, StatusAlert, UsageLevel,
};
