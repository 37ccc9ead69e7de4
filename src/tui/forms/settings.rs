//! Budget settings page state
//!
//! An add form above a month-grouped list of budgets. Rows of the list can
//! be edited in place or deleted.

use super::budget::BudgetForm;
use crate::error::TrackerResult;
use crate::models::{Budget, Money, MonthKey};
use crate::reports::{group_budgets_by_month, MonthBudgets};
use crate::services::validation::parse_amount;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsFocus {
    #[default]
    Form,
    List,
}

/// A budget row whose amount is being edited
#[derive(Debug, Clone)]
pub struct InlineEdit {
    pub budget: Budget,
    pub amount: TextInput,
    pub error: Option<String>,
}

impl InlineEdit {
    pub fn new(budget: Budget) -> Self {
        let amount = TextInput::new()
            .content(format!("{:.2}", budget.amount.to_f64()))
            .focused(true);
        Self {
            budget,
            amount,
            error: None,
        }
    }

    pub fn parse(&self) -> TrackerResult<Money> {
        parse_amount(self.amount.value())
    }
}

#[derive(Debug, Clone)]
pub struct BudgetSettingsState {
    pub form: BudgetForm,
    pub focus: SettingsFocus,
    pub groups: Vec<MonthBudgets>,
    /// Index into the flattened list, in display order
    pub selected: usize,
    pub editing: Option<InlineEdit>,
    pub loaded: bool,
    pub error: Option<String>,
}

impl BudgetSettingsState {
    pub fn new(month: &MonthKey) -> Self {
        Self {
            form: BudgetForm::new(month),
            focus: SettingsFocus::Form,
            groups: Vec::new(),
            selected: 0,
            editing: None,
            loaded: false,
            error: None,
        }
    }

    /// Replace the listed budgets, keeping the selection in range
    pub fn set_budgets(&mut self, budgets: Vec<Budget>) {
        self.groups = group_budgets_by_month(&budgets);
        self.loaded = true;
        self.error = None;
        let count = self.budget_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    pub fn budget_count(&self) -> usize {
        self.groups.iter().map(|g| g.budgets.len()).sum()
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        self.groups
            .iter()
            .flat_map(|g| g.budgets.iter())
            .nth(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.budget_count() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SettingsFocus::Form => {
                self.form.blur();
                SettingsFocus::List
            }
            SettingsFocus::List => {
                self.editing = None;
                self.form.focus();
                SettingsFocus::Form
            }
        };
    }

    pub fn start_edit(&mut self) {
        if let Some(budget) = self.selected_budget() {
            self.editing = Some(InlineEdit::new(budget.clone()));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
