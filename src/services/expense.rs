//! Expense service
//!
//! User-scoped expense operations over the API client, with validation
//! before any request is made.

use tracing::info;

use super::validation::check_amount;
use crate::api::{ApiClient, ExpenseList};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseUpdate, MonthKey, NewExpense};

/// Service for expense management
pub struct ExpenseService<'a> {
    api: &'a ApiClient,
    user_id: &'a str,
}

impl<'a> ExpenseService<'a> {
    pub fn new(api: &'a ApiClient, user_id: &'a str) -> Self {
        Self { api, user_id }
    }

    /// List expenses for a month (the backend defaults to the current one)
    pub fn list(&self, month: Option<&MonthKey>) -> TrackerResult<ExpenseList> {
        self.api.get_expenses(self.user_id, month).into_result()
    }

    pub fn create(&self, expense: &NewExpense) -> TrackerResult<Expense> {
        check_amount(expense.amount)?;
        let created = self.api.add_expense(self.user_id, expense).into_result()?;
        info!(expense_id = %created.id, "expense added");
        Ok(created)
    }

    pub fn update(&self, expense_id: &str, update: &ExpenseUpdate) -> TrackerResult<Expense> {
        if expense_id.trim().is_empty() {
            return Err(TrackerError::expense_not_found(expense_id));
        }
        if update.is_empty() {
            return Err(TrackerError::Validation(
                "Nothing to update. Provide at least one field to change".into(),
            ));
        }
        if let Some(amount) = update.amount {
            check_amount(amount)?;
        }
        let updated = self
            .api
            .update_expense(self.user_id, expense_id, update)
            .into_result()?;
        info!(expense_id, "expense updated");
        Ok(updated)
    }

    pub fn delete(&self, expense_id: &str) -> TrackerResult<String> {
        if expense_id.trim().is_empty() {
            return Err(TrackerError::expense_not_found(expense_id));
        }
        let message = self
            .api
            .delete_expense(self.user_id, expense_id)
            .into_result()?;
        info!(expense_id, "expense deleted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;
    use std::time::Duration;

    // Port 9 is discard; validation must fail before anything is sent
    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap()
    }

    #[test]
    fn test_create_rejects_zero_amount() {
        let api = client();
        let service = ExpenseService::new(&api, "u1");
        let expense = NewExpense::new(
            Money::zero(),
            Category::Other,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        let err = service.create(&expense).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid amount");
    }

    #[test]
    fn test_update_requires_a_field() {
        let api = client();
        let service = ExpenseService::new(&api, "u1");
        let err = service.update("e1", &ExpenseUpdate::default()).unwrap_err();
        assert!(err.is_validation());

        let err = service.delete("  ").unwrap_err();
        assert!(err.is_not_found());
    }
}
