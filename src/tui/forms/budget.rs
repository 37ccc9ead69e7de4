//! Add-budget form
//!
//! Shared by the add-budget page and the form at the top of budget settings.

use super::cycle;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, MonthKey, NewBudget};
use crate::services::validation::{parse_amount, parse_month, MSG_REQUIRED};
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetField {
    Amount,
    Category,
    Month,
}

const FIELDS: [BudgetField; 3] = [BudgetField::Amount, BudgetField::Category, BudgetField::Month];

#[derive(Debug, Clone)]
pub struct BudgetForm {
    pub amount: TextInput,
    /// `None` is the overall budget
    pub category: Option<Category>,
    pub month: TextInput,
    pub focus: BudgetField,
    pub error: Option<String>,
}

impl BudgetForm {
    pub fn new(month: &MonthKey) -> Self {
        let mut form = Self {
            amount: TextInput::new().label("Budget Amount").placeholder("0.00"),
            category: None,
            month: TextInput::new()
                .label("Month")
                .placeholder("YYYY-MM")
                .content(month.as_str()),
            focus: BudgetField::Amount,
            error: None,
        };
        form.sync_focus();
        form
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle(&FIELDS, self.focus, true);
        self.sync_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = cycle(&FIELDS, self.focus, false);
        self.sync_focus();
    }

    /// Step through Overall and then every category
    pub fn cycle_category(&mut self, forward: bool) {
        let mut options = vec![None];
        options.extend(Category::ALL.into_iter().map(Some));
        self.category = cycle(&options, self.category, forward);
    }

    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.name()).unwrap_or("Overall")
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            BudgetField::Amount => Some(&mut self.amount),
            BudgetField::Month => Some(&mut self.month),
            BudgetField::Category => None,
        }
    }

    /// Remove focus highlighting, used when another panel takes focus
    pub fn blur(&mut self) {
        self.amount.focused = false;
        self.month.focused = false;
    }

    pub fn focus(&mut self) {
        self.sync_focus();
    }

    /// Check the inputs and build the request body
    pub fn validate(&self) -> TrackerResult<NewBudget> {
        if self.amount.value().trim().is_empty() || self.month.value().trim().is_empty() {
            return Err(TrackerError::Validation(MSG_REQUIRED.into()));
        }
        let amount = parse_amount(self.amount.value())?;
        let month = parse_month(self.month.value())?;
        Ok(NewBudget::new(amount, month, self.category))
    }

    /// One-line summary of the budget about to be set
    pub fn preview(&self) -> Option<String> {
        let budget = self.validate().ok()?;
        Some(format!(
            "{} for {} in {}",
            budget.amount,
            self.category_label(),
            budget.month.label()
        ))
    }

    fn sync_focus(&mut self) {
        self.amount.focused = self.focus == BudgetField::Amount;
        self.month.focused = self.focus == BudgetField::Month;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn jan() -> MonthKey {
        MonthKey::parse("2024-01").unwrap()
    }

    #[test]
    fn test_category_cycle_includes_overall() {
        let mut form = BudgetForm::new(&jan());
        assert_eq!(form.category_label(), "Overall");
        form.cycle_category(true);
        assert_eq!(form.category, Some(Category::FoodDining));
        form.cycle_category(false);
        form.cycle_category(false);
        assert_eq!(form.category, Some(Category::Other));
    }

    #[test]
    fn test_validation() {
        let mut form = BudgetForm::new(&jan());
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please fill in all required fields"
        );
        assert!(form.preview().is_none());

        form.amount.set_value("abc");
        assert_eq!(form.validate().unwrap_err().to_string(), "Please enter a valid amount");

        form.amount.set_value("1500");
        form.month.set_value("2024-13");
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Invalid month format. Use YYYY-MM"
        );
    }

    #[test]
    fn test_preview() {
        let mut form = BudgetForm::new(&jan());
        form.amount.set_value("1500");
        form.cycle_category(true);

        let budget = form.validate().unwrap();
        assert_eq!(budget.amount, Money::from_cents(150000));
        assert_eq!(
            form.preview().unwrap(),
            "$1,500.00 for Food & Dining in January 2024"
        );
    }
}
