//! Event handler for the TUI
//!
//! Routes key presses to the open dialog or the current page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Dialog, Page};
use super::forms::auth::AuthField;
use super::forms::budget::BudgetField;
use super::forms::expense::ExpenseField;
use super::forms::settings::SettingsFocus;
use super::worker::BudgetOrigin;

/// Handle a key press
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.is_session_loading() {
        return;
    }

    if app.dialog != Dialog::None {
        handle_dialog_key(app, key);
        return;
    }

    match app.current_page() {
        Page::SignIn => handle_sign_in_key(app, key),
        Page::Dashboard | Page::Reports => handle_overview_key(app, key),
        Page::AddExpense => handle_expense_key(app, key),
        Page::AddBudget => handle_budget_key(app, key),
        Page::BudgetSettings => handle_settings_key(app, key),
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.dialog {
        Dialog::Help => app.dialog = Dialog::None,
        Dialog::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.dialog = Dialog::None,
            _ => {}
        },
        Dialog::None => {}
    }
}

fn handle_sign_in_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab | KeyCode::Down => app.sign_in_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.sign_in_form.focus_prev(),
        KeyCode::Left | KeyCode::Right if app.sign_in_form.focus == AuthField::Mode => {
            app.sign_in_form.toggle_mode()
        }
        KeyCode::Enter => match app.sign_in_form.focus {
            AuthField::Mode => app.sign_in_form.toggle_mode(),
            AuthField::Guest => app.sign_in_anonymous(),
            _ => app.submit_sign_in(),
        },
        _ => {
            if let Some(input) = app.sign_in_form.focused_input_mut() {
                input.handle_key(key);
            }
        }
    }
}

/// Dashboard and reports share navigation keys
fn handle_overview_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.dialog = Dialog::Help,
        KeyCode::Char('[') | KeyCode::Left => app.prev_month(),
        KeyCode::Char(']') | KeyCode::Right => app.next_month(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::F(5) => app.refresh_overview(),
        KeyCode::Esc => app.go_back(),
        KeyCode::Char(c) => {
            if let Some(page) = Page::NAV.into_iter().find(|p| p.hotkey() == Some(c)) {
                app.enter(page);
            }
        }
        _ => {}
    }
}

fn handle_expense_key(app: &mut App, key: KeyEvent) {
    if app.is_submitting() {
        return;
    }
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.submit_expense(),
        KeyCode::Tab | KeyCode::Down => app.expense_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.expense_form.focus_prev(),
        KeyCode::Left if app.expense_form.focus == ExpenseField::Category => {
            app.expense_form.cycle_category(false)
        }
        KeyCode::Right if app.expense_form.focus == ExpenseField::Category => {
            app.expense_form.cycle_category(true)
        }
        _ => {
            if let Some(input) = app.expense_form.focused_input_mut() {
                input.handle_key(key);
            }
        }
    }
}

fn handle_budget_key(app: &mut App, key: KeyEvent) {
    if app.is_submitting() {
        return;
    }
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.submit_budget(BudgetOrigin::AddPage),
        KeyCode::Tab | KeyCode::Down => app.budget_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.budget_form.focus_prev(),
        KeyCode::Left if app.budget_form.focus == BudgetField::Category => {
            app.budget_form.cycle_category(false)
        }
        KeyCode::Right if app.budget_form.focus == BudgetField::Category => {
            app.budget_form.cycle_category(true)
        }
        _ => {
            if let Some(input) = app.budget_form.focused_input_mut() {
                input.handle_key(key);
            }
        }
    }
}

/// Tab moves between the add form and the budget list
fn handle_settings_key(app: &mut App, key: KeyEvent) {
    if app.is_submitting() {
        return;
    }
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.budget_settings.toggle_focus();
        return;
    }

    match app.budget_settings.focus {
        SettingsFocus::Form => {
            let on_category = app.budget_settings.form.focus == BudgetField::Category;
            match key.code {
                KeyCode::Down => app.budget_settings.form.focus_next(),
                KeyCode::Up => app.budget_settings.form.focus_prev(),
                KeyCode::Left if on_category => app.budget_settings.form.cycle_category(false),
                KeyCode::Right if on_category => app.budget_settings.form.cycle_category(true),
                KeyCode::Esc => app.go_back(),
                KeyCode::Enter => app.submit_budget(BudgetOrigin::SettingsForm),
                _ => {
                    if let Some(input) = app.budget_settings.form.focused_input_mut() {
                        input.handle_key(key);
                    }
                }
            }
        }
        SettingsFocus::List if app.budget_settings.editing.is_some() => match key.code {
            KeyCode::Esc => app.budget_settings.cancel_edit(),
            KeyCode::Enter => app.save_inline_edit(),
            _ => {
                if let Some(edit) = app.budget_settings.editing.as_mut() {
                    edit.amount.handle_key(key);
                }
            }
        },
        SettingsFocus::List => match key.code {
            KeyCode::Esc => app.go_back(),
            KeyCode::Up | KeyCode::Char('k') => app.budget_settings.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.budget_settings.select_next(),
            KeyCode::Enter => app.budget_settings.start_edit(),
            KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),
            KeyCode::Char('?') => app.dialog = Dialog::Help,
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char(c) => {
                if let Some(page) = Page::NAV.into_iter().find(|p| p.hotkey() == Some(c)) {
                    app.enter(page);
                }
            }
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Money, MonthKey};
    use crate::tui::app::tests::{app, signed_in_app};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn budget() -> Budget {
        Budget {
            id: "b1".into(),
            category: Some(Category::Shopping),
            amount: Money::from_cents(20000),
            month: MonthKey::parse("2024-01").unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = signed_in_app();
        app.enter(Page::AddExpense);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_is_text_on_form_pages() {
        let mut app = signed_in_app();
        app.enter(Page::AddExpense);
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "quick lunch");

        assert!(!app.should_quit);
        assert_eq!(app.expense_form.note.value(), "quick lunch");
    }

    #[test]
    fn test_page_hotkeys_and_escape() {
        let mut app = signed_in_app();
        handle_key(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.current_page(), Page::AddBudget);

        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.current_page(), Page::Dashboard);

        handle_key(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.current_page(), Page::Reports);
    }

    #[test]
    fn test_month_navigation() {
        let mut app = signed_in_app();
        let start = app.month.clone();
        handle_key(&mut app, key(KeyCode::Char(']')));
        assert_eq!(app.month, start.next());
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.month, start.prev());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = signed_in_app();
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.dialog, Dialog::Help);
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert_eq!(app.dialog, Dialog::None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_confirm_dialog_cancel() {
        let mut app = signed_in_app();
        app.dialog = Dialog::ConfirmDelete(budget());
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert!(matches!(app.dialog, Dialog::ConfirmDelete(_)));
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.dialog, Dialog::None);
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_sign_in_mode_toggle_and_typing() {
        let mut app = app();
        type_text(&mut app, "bob@example.com");
        assert_eq!(app.sign_in_form.email.value(), "bob@example.com");

        handle_key(&mut app, key(KeyCode::BackTab));
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.sign_in_form.mode.label(), "Sign Up");
    }

    #[test]
    fn test_guest_button_signs_in() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::BackTab));
        handle_key(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.sign_in_form.focus, AuthField::Guest);
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.user().unwrap().is_anonymous);
        assert_eq!(app.current_page(), Page::Dashboard);
    }

    #[test]
    fn test_budget_list_accepts_global_keys() {
        let mut app = signed_in_app();
        app.enter(Page::BudgetSettings);
        app.budget_settings.set_budgets(vec![budget()]);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.budget_settings.focus, SettingsFocus::List);

        handle_key(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.dialog, Dialog::Help);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.dialog, Dialog::None);

        handle_key(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.current_page(), Page::Reports);
    }

    #[test]
    fn test_budget_form_keeps_letters_as_text() {
        let mut app = signed_in_app();
        app.enter(Page::BudgetSettings);
        assert_eq!(app.budget_settings.focus, SettingsFocus::Form);
        handle_key(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.current_page(), Page::BudgetSettings);
    }
}
