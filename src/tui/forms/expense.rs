//! Add-expense form

use chrono::NaiveDate;

use super::cycle;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, NewExpense};
use crate::services::validation::{parse_amount, parse_date, MSG_REQUIRED};
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Amount,
    Category,
    Date,
    Note,
}

const FIELDS: [ExpenseField; 4] = [
    ExpenseField::Amount,
    ExpenseField::Category,
    ExpenseField::Date,
    ExpenseField::Note,
];

#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub amount: TextInput,
    pub category: Category,
    pub date: TextInput,
    pub note: TextInput,
    pub focus: ExpenseField,
    pub error: Option<String>,
}

impl ExpenseForm {
    /// An empty form dated `today`
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Self {
            amount: TextInput::new().label("Amount").placeholder("0.00"),
            category: Category::default(),
            date: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format("%Y-%m-%d").to_string()),
            note: TextInput::new()
                .label("Note")
                .placeholder("Add a note about this expense..."),
            focus: ExpenseField::Amount,
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

    pub fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.cycle_next()
        } else {
            self.category.cycle_prev()
        };
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            ExpenseField::Amount => Some(&mut self.amount),
            ExpenseField::Date => Some(&mut self.date),
            ExpenseField::Note => Some(&mut self.note),
            ExpenseField::Category => None,
        }
    }

    /// Check the inputs and build the request body
    pub fn validate(&self) -> TrackerResult<NewExpense> {
        if self.amount.value().trim().is_empty() || self.date.value().trim().is_empty() {
            return Err(TrackerError::Validation(MSG_REQUIRED.into()));
        }
        let amount = parse_amount(self.amount.value())?;
        let date = parse_date(self.date.value())?;
        Ok(NewExpense::new(amount, self.category, date).with_note(self.note.value()))
    }

    fn sync_focus(&mut self) {
        self.amount.focused = self.focus == ExpenseField::Amount;
        self.date.focused = self.focus == ExpenseField::Date;
        self.note.focused = self.focus == ExpenseField::Note;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_prefilled_date() {
        let form = ExpenseForm::new(today());
        assert_eq!(form.date.value(), "2024-01-15");
        assert_eq!(form.category, Category::FoodDining);
    }

    #[test]
    fn test_validation_messages() {
        let mut form = ExpenseForm::new(today());
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please fill in all required fields"
        );

        form.amount.set_value("-4");
        assert_eq!(form.validate().unwrap_err().to_string(), "Please enter a valid amount");

        form.amount.set_value("12.50");
        form.date.set_value("2024-1-5");
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Invalid date format. Use YYYY-MM-DD"
        );
    }

    #[test]
    fn test_valid_expense() {
        let mut form = ExpenseForm::new(today());
        form.amount.set_value("12.50");
        form.cycle_category(true);
        form.note.set_value("  ");

        let expense = form.validate().unwrap();
        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.category, Category::Transportation);
        assert_eq!(expense.date, today());
        assert!(expense.note.is_none());
    }
}
