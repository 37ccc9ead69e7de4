//! Form state for the TUI pages
//!
//! Each form owns its inputs, its focused field and its inline error. The
//! forms validate locally; sending is left to the app.

pub mod auth;
pub mod budget;
pub mod expense;
pub mod settings;

pub use auth::{AuthField, AuthMode, SignInForm};
pub use budget::{BudgetField, BudgetForm};
pub use expense::{ExpenseField, ExpenseForm};
pub use settings::{BudgetSettingsState, InlineEdit, SettingsFocus};

/// Step through `items` from `current`, wrapping at both ends
pub(crate) fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let Some(pos) = items.iter().position(|i| *i == current) else {
        return items.first().copied().unwrap_or(current);
    };
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let items = [1, 2, 3];
        assert_eq!(cycle(&items, 3, true), 1);
        assert_eq!(cycle(&items, 1, false), 3);
        assert_eq!(cycle(&items, 9, true), 1);
    }
}
