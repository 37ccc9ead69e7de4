//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Session operations run inline; backend requests go through `Workers` and
//! come back through `tick`.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::forms::{BudgetForm, BudgetSettingsState, ExpenseForm, SignInForm};
use super::forms::auth::AuthMode;
use super::widgets::{Notification, NotificationQueue};
use super::worker::{BudgetOrigin, Completed, Outcome, Slot, Workers};
use crate::api::ApiClient;
use crate::models::{Budget, MonthKey};
use crate::services::{BudgetService, DashboardService, ExpenseService, MonthOverview};
use crate::session::{AppSession, AuthResult, SessionEvent, User};

/// Delay before returning to the dashboard after a successful add
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Months listed on the budget settings page
pub const SETTINGS_MONTHS: usize = 12;

/// The pages of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    SignIn,
    Dashboard,
    AddExpense,
    AddBudget,
    BudgetSettings,
    Reports,
}

impl Page {
    /// Pages reachable from the navigation bar, in display order
    pub const NAV: [Page; 5] = [
        Page::Dashboard,
        Page::AddExpense,
        Page::AddBudget,
        Page::BudgetSettings,
        Page::Reports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::SignIn => "Sign In",
            Page::Dashboard => "Dashboard",
            Page::AddExpense => "Add Expense",
            Page::AddBudget => "Add Budget",
            Page::BudgetSettings => "Budget Settings",
            Page::Reports => "Reports",
        }
    }

    pub fn hotkey(&self) -> Option<char> {
        match self {
            Page::SignIn => None,
            Page::Dashboard => Some('d'),
            Page::AddExpense => Some('e'),
            Page::AddBudget => Some('b'),
            Page::BudgetSettings => Some('s'),
            Page::Reports => Some('r'),
        }
    }

    /// Where Esc leads from this page
    pub fn back(self) -> Page {
        match self {
            Page::SignIn => Page::SignIn,
            _ => Page::Dashboard,
        }
    }
}

/// Currently open modal
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dialog {
    #[default]
    None,
    Help,
    ConfirmDelete(Budget),
}

/// Main application state
pub struct App {
    pub session: AppSession,
    session_events: Receiver<SessionEvent>,
    pub api: ApiClient,

    /// Whether the app should quit
    pub should_quit: bool,
    pub page: Page,
    pub dialog: Dialog,

    /// Month shown by the dashboard and reports
    pub month: MonthKey,
    pub overview: Option<MonthOverview>,
    pub overview_error: Option<String>,

    pub sign_in_form: SignInForm,
    pub expense_form: ExpenseForm,
    pub budget_form: BudgetForm,
    pub budget_settings: BudgetSettingsState,

    pub notifications: NotificationQueue,
    pub workers: Workers,
    redirect: Option<(Instant, Page)>,
}

impl App {
    pub fn new(mut session: AppSession, api: ApiClient) -> Self {
        let session_events = session.subscribe();
        let month = MonthKey::current();
        Self {
            session,
            session_events,
            api,
            should_quit: false,
            page: Page::SignIn,
            dialog: Dialog::None,
            overview: None,
            overview_error: None,
            sign_in_form: SignInForm::new(),
            expense_form: ExpenseForm::new(today()),
            budget_form: BudgetForm::new(&month),
            budget_settings: BudgetSettingsState::new(&month),
            month,
            notifications: NotificationQueue::new(),
            workers: Workers::new(),
            redirect: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    /// The page to draw: sign-in is forced while nobody is signed in
    pub fn current_page(&self) -> Page {
        match (self.user(), self.page) {
            (None, _) => Page::SignIn,
            (Some(_), Page::SignIn) => Page::Dashboard,
            (Some(_), page) => page,
        }
    }

    pub fn is_session_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.workers.is_busy(Slot::Submit)
    }

    pub fn is_loading_overview(&self) -> bool {
        self.workers.is_busy(Slot::Overview)
    }

    pub fn is_loading_settings(&self) -> bool {
        self.workers.is_busy(Slot::SettingsBudgets)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    // --- session -------------------------------------------------------

    /// Resume the saved session, if any
    pub fn restore_session(&mut self) {
        let restored = self.session.restore().map(|user| user.is_some());
        self.sync_token();
        match restored {
            Ok(true) => self.enter(Page::Dashboard),
            Ok(false) => {}
            Err(e) => self.notify(Notification::warning(format!(
                "Your session has expired. Please sign in again. ({})",
                e
            ))),
        }
    }

    /// Submit the sign-in form in its current mode
    pub fn submit_sign_in(&mut self) {
        let email = self.sign_in_form.email();
        let password = self.sign_in_form.password();
        let result = match self.sign_in_form.mode {
            AuthMode::SignIn => self.session.sign_in(&email, &password).map(|_| ()),
            AuthMode::SignUp => {
                let confirm = self.sign_in_form.confirmation();
                self.session.sign_up(&email, &password, &confirm).map(|_| ())
            }
        };
        self.finish_sign_in(result);
    }

    pub fn sign_in_anonymous(&mut self) {
        let result = self.session.sign_in_anonymous().map(|_| ());
        self.finish_sign_in(result);
    }

    fn finish_sign_in(&mut self, result: AuthResult<()>) {
        self.sync_token();
        match result {
            Ok(()) => {
                self.sign_in_form = SignInForm::new();
                self.enter(Page::Dashboard);
            }
            Err(e) => {
                self.sign_in_form.clear_secrets();
                self.sign_in_form.error = Some(e.to_string());
            }
        }
    }

    /// Sign out and return to the sign-in page
    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "sign out failed");
            self.notify(Notification::error(e.to_string()));
            return;
        }
        self.after_sign_out();
    }

    fn after_sign_out(&mut self) {
        self.sync_token();
        self.workers.invalidate_all();
        self.overview = None;
        self.overview_error = None;
        self.budget_settings = BudgetSettingsState::new(&self.month);
        self.dialog = Dialog::None;
        self.redirect = None;
        self.page = Page::SignIn;
    }

    /// Pass token changes on to the API client
    fn sync_token(&mut self) {
        while let Ok(event) = self.session_events.try_recv() {
            self.api.apply_session_event(&event);
        }
    }

    /// A client with a fresh token and the user to scope requests to
    fn request_context(&mut self) -> Option<(ApiClient, String)> {
        let refreshed = self.session.ensure_fresh().map(|_| ());
        if let Err(e) = refreshed {
            warn!(error = %e, "token refresh failed");
            self.notify(Notification::error(format!(
                "Your session has expired. Please sign in again. ({})",
                e
            )));
            self.after_sign_out();
            return None;
        }
        self.sync_token();
        let uid = self.user()?.uid.clone();
        Some((self.api.clone(), uid))
    }

    // --- navigation ----------------------------------------------------

    /// Show `page`
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        self.redirect = None;
    }

    /// Show `page` and load what it needs
    pub fn enter(&mut self, page: Page) {
        self.navigate(page);
        match page {
            Page::Dashboard | Page::Reports => {
                let stale = self
                    .overview
                    .as_ref()
                    .map_or(true, |o| o.month != self.month);
                if stale && !self.is_loading_overview() {
                    self.refresh_overview();
                }
            }
            Page::AddExpense => self.expense_form = ExpenseForm::new(today()),
            Page::AddBudget => self.budget_form = BudgetForm::new(&MonthKey::current()),
            Page::BudgetSettings => self.refresh_settings(),
            Page::SignIn => {}
        }
    }

    /// Esc: leave the current page
    pub fn go_back(&mut self) {
        let target = self.current_page().back();
        self.enter(target);
    }

    pub fn prev_month(&mut self) {
        self.set_month(self.month.prev());
    }

    pub fn next_month(&mut self) {
        self.set_month(self.month.next());
    }

    fn set_month(&mut self, month: MonthKey) {
        if month == self.month {
            return;
        }
        self.month = month;
        self.overview = None;
        self.overview_error = None;
        self.refresh_overview();
    }

    // --- requests ------------------------------------------------------

    pub fn refresh_overview(&mut self) {
        let Some((api, uid)) = self.request_context() else {
            return;
        };
        let month = self.month.clone();
        self.workers.spawn(Slot::Overview, move || {
            Outcome::Overview(DashboardService::new(&api, &uid).overview(&month))
        });
    }

    pub fn refresh_settings(&mut self) {
        let Some((api, uid)) = self.request_context() else {
            return;
        };
        let months = MonthKey::current().trailing(SETTINGS_MONTHS);
        self.workers.spawn(Slot::SettingsBudgets, move || {
            Outcome::SettingsBudgets(BudgetService::new(&api, &uid).list_months(&months))
        });
    }

    pub fn submit_expense(&mut self) {
        if self.is_submitting() {
            return;
        }
        let expense = match self.expense_form.validate() {
            Ok(expense) => expense,
            Err(e) => {
                self.expense_form.error = Some(e.to_string());
                return;
            }
        };
        self.expense_form.error = None;

        let Some((api, uid)) = self.request_context() else {
            return;
        };
        self.workers.spawn(Slot::Submit, move || {
            Outcome::ExpenseAdded(ExpenseService::new(&api, &uid).create(&expense))
        });
    }

    /// Submit the add-budget page form or the settings page form
    pub fn submit_budget(&mut self, origin: BudgetOrigin) {
        if self.is_submitting() {
            return;
        }
        let form = match origin {
            BudgetOrigin::AddPage => &mut self.budget_form,
            _ => &mut self.budget_settings.form,
        };
        let budget = match form.validate() {
            Ok(budget) => budget,
            Err(e) => {
                form.error = Some(e.to_string());
                return;
            }
        };
        form.error = None;

        let Some((api, uid)) = self.request_context() else {
            return;
        };
        self.workers.spawn(Slot::Submit, move || {
            Outcome::BudgetSaved(origin, BudgetService::new(&api, &uid).create(&budget))
        });
    }

    /// Save the amount typed into the row being edited
    pub fn save_inline_edit(&mut self) {
        if self.is_submitting() {
            return;
        }
        let Some(edit) = self.budget_settings.editing.as_mut() else {
            return;
        };
        let amount = match edit.parse() {
            Ok(amount) => amount,
            Err(e) => {
                edit.error = Some(e.to_string());
                return;
            }
        };
        edit.error = None;
        let budget = edit.budget.clone();

        let Some((api, uid)) = self.request_context() else {
            return;
        };
        self.workers.spawn(Slot::Submit, move || {
            Outcome::BudgetSaved(
                BudgetOrigin::InlineEdit,
                BudgetService::new(&api, &uid).update_amount(&budget, amount),
            )
        });
    }

    /// Ask before deleting the selected budget
    pub fn request_delete(&mut self) {
        if let Some(budget) = self.budget_settings.selected_budget() {
            self.dialog = Dialog::ConfirmDelete(budget.clone());
        }
    }

    pub fn confirm_delete(&mut self) {
        let Dialog::ConfirmDelete(budget) = std::mem::take(&mut self.dialog) else {
            return;
        };
        if self.is_submitting() {
            return;
        }
        let Some((api, uid)) = self.request_context() else {
            return;
        };
        self.workers.spawn(Slot::Submit, move || {
            Outcome::BudgetDeleted(BudgetService::new(&api, &uid).delete(&budget.id))
        });
    }

    // --- background results ---------------------------------------------

    /// Periodic housekeeping: expire notifications, follow pending
    /// redirects and apply finished requests
    pub fn tick(&mut self, now: Instant) {
        self.notifications.remove_expired(now);

        if let Some((at, page)) = self.redirect {
            if now >= at {
                self.redirect = None;
                self.enter(page);
            }
        }

        for done in self.workers.drain() {
            self.apply(done, now);
        }
        self.sync_token();
    }

    /// Apply one finished request
    pub fn apply(&mut self, done: Completed, now: Instant) {
        match done.outcome {
            Outcome::Overview(Ok(overview)) => {
                if overview.month == self.month {
                    self.overview = Some(overview);
                    self.overview_error = None;
                }
            }
            Outcome::Overview(Err(e)) => {
                self.overview_error = Some(e.to_string());
            }

            Outcome::SettingsBudgets(Ok(budgets)) => self.budget_settings.set_budgets(budgets),
            Outcome::SettingsBudgets(Err(e)) => self.budget_settings.error = Some(e.to_string()),

            Outcome::ExpenseAdded(Ok(expense)) => {
                info!(expense_id = %expense.id, "expense added from tui");
                self.notify(Notification::success("Expense added successfully!"));
                self.expense_form = ExpenseForm::new(today());
                self.invalidate_overview();
                self.redirect_to_dashboard(Page::AddExpense, now);
            }
            Outcome::ExpenseAdded(Err(e)) => self.expense_form.error = Some(e.to_string()),

            Outcome::BudgetSaved(origin, Ok(_)) => {
                let message = match origin {
                    BudgetOrigin::AddPage => "Budget set successfully!",
                    BudgetOrigin::SettingsForm => "Budget added successfully!",
                    BudgetOrigin::InlineEdit => "Budget updated successfully!",
                };
                self.notify(Notification::success(message));
                match origin {
                    BudgetOrigin::AddPage => {
                        self.budget_form = BudgetForm::new(&MonthKey::current());
                        self.redirect_to_dashboard(Page::AddBudget, now);
                    }
                    BudgetOrigin::SettingsForm => {
                        self.budget_settings.form = BudgetForm::new(&MonthKey::current());
                        self.refresh_settings();
                    }
                    BudgetOrigin::InlineEdit => {
                        self.budget_settings.cancel_edit();
                        self.refresh_settings();
                    }
                }
                self.invalidate_overview();
            }
            Outcome::BudgetSaved(origin, Err(e)) => {
                let message = e.to_string();
                match origin {
                    BudgetOrigin::AddPage => self.budget_form.error = Some(message),
                    BudgetOrigin::SettingsForm => self.budget_settings.form.error = Some(message),
                    BudgetOrigin::InlineEdit => match self.budget_settings.editing.as_mut() {
                        Some(edit) => edit.error = Some(message),
                        None => self.notify(Notification::error(message)),
                    },
                }
            }

            Outcome::BudgetDeleted(Ok(_)) => {
                self.notify(Notification::success("Budget deleted successfully!"));
                self.refresh_settings();
                self.invalidate_overview();
            }
            Outcome::BudgetDeleted(Err(e)) => self.notify(Notification::error(e.to_string())),
        }
    }

    /// Drop the cached month so the next dashboard visit reloads it
    fn invalidate_overview(&mut self) {
        self.overview = None;
        if matches!(self.current_page(), Page::Dashboard | Page::Reports) {
            self.refresh_overview();
        }
    }

    fn redirect_to_dashboard(&mut self, from: Page, now: Instant) {
        if self.current_page() == from {
            self.redirect = Some((now + REDIRECT_DELAY, Page::Dashboard));
        }
    }

    pub fn pending_redirect(&self) -> Option<Page> {
        self.redirect.map(|(_, page)| page)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::models::{Money, Report, SummaryRecord};
    use crate::session::provider::tests::FakeIdentity;
    use crate::session::{IdentityProvider, SessionProvider};

    pub(crate) fn app() -> App {
        let identity: Box<dyn IdentityProvider> = Box::new(FakeIdentity::default());
        let mut session = SessionProvider::new(identity);
        let _ = session.restore();
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        App::new(session, api)
    }

    pub(crate) fn signed_in_app() -> App {
        let mut app = app();
        app.sign_in_anonymous();
        app
    }

    fn overview_for(month: &MonthKey) -> MonthOverview {
        MonthOverview {
            month: month.clone(),
            summary: SummaryRecord::from_totals(Money::from_cents(100), Money::zero(), 1, 0),
            report: Report::default(),
        }
    }

    fn completed(slot: Slot, generation: u64, outcome: Outcome) -> Completed {
        Completed {
            slot,
            generation,
            outcome,
        }
    }

    #[test]
    fn test_back_targets() {
        assert_eq!(Page::AddExpense.back(), Page::Dashboard);
        assert_eq!(Page::Reports.back(), Page::Dashboard);
        assert_eq!(Page::Dashboard.back(), Page::Dashboard);
        assert_eq!(Page::SignIn.back(), Page::SignIn);
    }

    #[test]
    fn test_sign_in_is_forced_without_user() {
        let mut app = app();
        app.navigate(Page::Reports);
        assert_eq!(app.current_page(), Page::SignIn);
    }

    #[test]
    fn test_sign_in_lands_on_dashboard() {
        let mut app = app();
        app.sign_in_form.email.set_value("alice@example.com");
        app.sign_in_form.password.set_value("secret1");
        app.submit_sign_in();

        assert_eq!(app.user().unwrap().uid, "alice");
        assert_eq!(app.current_page(), Page::Dashboard);
        assert!(app.api.has_token());
        assert!(app.is_loading_overview());
    }

    #[test]
    fn test_sign_in_error_is_inline() {
        let mut app = app();
        app.sign_in_form.email.set_value("not-an-email");
        app.sign_in_form.password.set_value("secret1");
        app.submit_sign_in();

        assert!(app.user().is_none());
        assert_eq!(
            app.sign_in_form.error.as_deref(),
            Some("Please enter a valid email address")
        );
        assert!(app.sign_in_form.password.value().is_empty());
    }

    #[test]
    fn test_navigate_and_go_back() {
        let mut app = signed_in_app();
        app.navigate(Page::BudgetSettings);
        assert_eq!(app.current_page(), Page::BudgetSettings);
        app.go_back();
        assert_eq!(app.current_page(), Page::Dashboard);
    }

    #[test]
    fn test_overview_for_other_month_is_ignored() {
        let mut app = signed_in_app();
        let old_month = app.month.clone();
        app.next_month();

        app.apply(
            completed(Slot::Overview, 1, Outcome::Overview(Ok(overview_for(&old_month)))),
            Instant::now(),
        );
        assert!(app.overview.is_none());

        let current = app.month.clone();
        app.apply(
            completed(Slot::Overview, 2, Outcome::Overview(Ok(overview_for(&current)))),
            Instant::now(),
        );
        assert_eq!(app.overview.as_ref().unwrap().month, current);
    }

    #[test]
    fn test_invalid_expense_never_sent() {
        let mut app = signed_in_app();
        app.enter(Page::AddExpense);
        app.submit_expense();

        assert_eq!(
            app.expense_form.error.as_deref(),
            Some("Please fill in all required fields")
        );
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_expense_added_redirects_after_delay() {
        let mut app = signed_in_app();
        app.enter(Page::AddExpense);
        let now = Instant::now();

        let expense = crate::models::Expense {
            id: "e1".into(),
            amount: Money::from_cents(1250),
            category: crate::models::Category::FoodDining,
            date: today(),
            note: None,
            created_at: None,
            updated_at: None,
        };
        app.apply(completed(Slot::Submit, 1, Outcome::ExpenseAdded(Ok(expense))), now);

        assert_eq!(
            app.notifications.current().unwrap().message,
            "Expense added successfully!"
        );
        assert_eq!(app.pending_redirect(), Some(Page::Dashboard));

        app.tick(now + Duration::from_millis(1000));
        assert_eq!(app.current_page(), Page::AddExpense);
        app.tick(now + REDIRECT_DELAY);
        assert_eq!(app.current_page(), Page::Dashboard);
    }

    #[test]
    fn test_budget_error_shown_on_origin_form() {
        let mut app = signed_in_app();
        app.apply(
            completed(
                Slot::Submit,
                1,
                Outcome::BudgetSaved(
                    BudgetOrigin::SettingsForm,
                    Err(TrackerError::Validation(
                        "Budget already exists for this category and month".into(),
                    )),
                ),
            ),
            Instant::now(),
        );
        assert_eq!(
            app.budget_settings.form.error.as_deref(),
            Some("Budget already exists for this category and month")
        );
        assert!(app.budget_form.error.is_none());
    }

    #[test]
    fn test_logout_returns_to_sign_in() {
        let mut app = signed_in_app();
        app.navigate(Page::Reports);
        app.logout();

        assert!(app.user().is_none());
        assert_eq!(app.current_page(), Page::SignIn);
        assert!(!app.api.has_token());
        assert!(!app.is_loading_overview());
    }
}
