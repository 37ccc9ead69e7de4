//! REST backend access
//!
//! `ApiClient` is the only component that talks to the backend. It never
//! fails loudly: every call returns an `ApiResponse`.

pub mod client;
pub mod response;

pub use client::ApiClient;
pub use response::{ApiResponse, BudgetList, ExpenseList};
