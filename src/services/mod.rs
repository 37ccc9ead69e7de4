//! Service layer for fintrack
//!
//! User-scoped operations on top of the API client. Services validate input
//! before any request and turn `ApiResponse` failures into `TrackerError`.

pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod validation;

pub use budget::BudgetService;
pub use dashboard::{DashboardService, MonthOverview};
pub use expense::ExpenseService;
