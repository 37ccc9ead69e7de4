//! Budget service
//!
//! Budgets are unique per `(category, month)`. Creating one checks the
//! month's existing budgets first; updating one relies on the backend's
//! upsert on that same pair.

use tracing::info;

use super::validation::{check_amount, MSG_BUDGET_EXISTS};
use crate::api::{ApiClient, BudgetList};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Category, Money, MonthKey, NewBudget};

/// Service for budget management
pub struct BudgetService<'a> {
    api: &'a ApiClient,
    user_id: &'a str,
}

impl<'a> BudgetService<'a> {
    pub fn new(api: &'a ApiClient, user_id: &'a str) -> Self {
        Self { api, user_id }
    }

    pub fn list(&self, month: Option<&MonthKey>) -> TrackerResult<BudgetList> {
        self.api.get_budgets(self.user_id, month).into_result()
    }

    /// Budgets across several months, in the order the months are given
    pub fn list_months(&self, months: &[MonthKey]) -> TrackerResult<Vec<Budget>> {
        let mut all = Vec::new();
        for month in months {
            all.extend(self.list(Some(month))?.budgets);
        }
        Ok(all)
    }

    /// Create a budget, refusing if the slot is already taken
    pub fn create(&self, budget: &NewBudget) -> TrackerResult<Budget> {
        check_amount(budget.amount)?;
        let existing = self.list(Some(&budget.month))?.budgets;
        ensure_slot_free(&existing, budget.category, &budget.month)?;

        let created = self.api.set_budget(self.user_id, budget).into_result()?;
        info!(budget_id = %created.id, month = %created.month, "budget created");
        Ok(created)
    }

    /// Change the amount of an existing budget
    pub fn update_amount(&self, existing: &Budget, amount: Money) -> TrackerResult<Budget> {
        check_amount(amount)?;
        let body = NewBudget::new(amount, existing.month.clone(), existing.category);
        let updated = self.api.set_budget(self.user_id, &body).into_result()?;
        info!(budget_id = %updated.id, "budget updated");
        Ok(updated)
    }

    /// Find the budget in a slot and change its amount
    pub fn update_slot(
        &self,
        category: Option<Category>,
        month: &MonthKey,
        amount: Money,
    ) -> TrackerResult<Budget> {
        let existing = self.list(Some(month))?.budgets;
        let budget = find_slot(&existing, category, month).ok_or_else(|| {
            TrackerError::budget_not_found(format!(
                "{} for {}",
                category.map(|c| c.name()).unwrap_or("Overall"),
                month
            ))
        })?;
        self.update_amount(budget, amount)
    }

    pub fn delete(&self, budget_id: &str) -> TrackerResult<String> {
        if budget_id.trim().is_empty() {
            return Err(TrackerError::budget_not_found(budget_id));
        }
        let message = self
            .api
            .delete_budget(self.user_id, budget_id)
            .into_result()?;
        info!(budget_id, "budget deleted");
        Ok(message)
    }
}

/// Find the budget occupying a `(category, month)` slot
pub fn find_slot<'b>(
    budgets: &'b [Budget],
    category: Option<Category>,
    month: &MonthKey,
) -> Option<&'b Budget> {
    budgets.iter().find(|b| b.occupies(category, month))
}

/// Fail if a budget already occupies the slot
pub fn ensure_slot_free(
    budgets: &[Budget],
    category: Option<Category>,
    month: &MonthKey,
) -> TrackerResult<()> {
    match find_slot(budgets, category, month) {
        Some(_) => Err(TrackerError::Validation(MSG_BUDGET_EXISTS.into())),
        None => Ok(()),
    }
}
