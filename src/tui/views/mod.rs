//! TUI Views module
//!
//! One view per page plus the navigation bar, status bar and the loading
//! screen shown while the saved session is resolved.

pub mod add_budget;
pub mod add_expense;
pub mod budget_settings;
pub mod dashboard;
pub mod loading;
pub mod nav_bar;
pub mod reports;
pub mod sign_in;
pub mod status_bar;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, Dialog, Page};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::NotificationWidget;
use crate::reports::{AlertKind, StatusAlert, UsageLevel};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    if app.is_session_loading() {
        loading::render(frame, frame.area());
        return;
    }

    let layout = AppLayout::new(frame.area());

    nav_bar::render(frame, app, layout.nav_bar);

    match app.current_page() {
        Page::SignIn => sign_in::render(frame, app, layout.main),
        Page::Dashboard => dashboard::render(frame, app, layout.main),
        Page::AddExpense => add_expense::render(frame, app, layout.main),
        Page::AddBudget => add_budget::render(frame, app, layout.main),
        Page::BudgetSettings => budget_settings::render(frame, app, layout.main),
        Page::Reports => reports::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if let Some(notification) = app.notifications.current() {
        let area = toast_area(frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }

    match &app.dialog {
        Dialog::Help => dialogs::help::render(frame, app),
        Dialog::ConfirmDelete(budget) => dialogs::confirm::render_delete_budget(frame, budget),
        Dialog::None => {}
    }
}

/// Top-right corner, below the nav bar
fn toast_area(area: Rect) -> Rect {
    let width = 44.min(area.width);
    let height = 4.min(area.height.saturating_sub(3));
    Rect::new(area.x + area.width - width, area.y + 3, width, height)
}

/// Bordered block used around page panels
pub(crate) fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

pub(crate) fn alert_color(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Info => Color::Blue,
        AlertKind::Warning => Color::Yellow,
        AlertKind::Success => Color::Green,
    }
}

/// Gauge colour for a usage level
pub(crate) fn usage_color(level: UsageLevel) -> Color {
    match level {
        UsageLevel::Normal => Color::Green,
        UsageLevel::Elevated => Color::Yellow,
        UsageLevel::High => Color::Red,
    }
}

/// A one-line banner for a status alert
pub(crate) fn render_alert(frame: &mut Frame, alert: &StatusAlert, area: Rect) {
    let color = alert_color(alert.kind);
    let paragraph = Paragraph::new(Line::from(alert.message.as_str()))
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}

/// Inline form error, or nothing
pub(crate) fn error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        None => Line::from(""),
    }
}

/// Key hint line shown under forms
pub(crate) fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

/// Split a form area into one-line rows
pub(crate) fn rows(area: Rect, count: usize) -> Vec<Rect> {
    let constraints = vec![Constraint::Length(1); count];
    Layout::vertical(constraints).split(area).to_vec()
}

/// A placeholder for a panel whose data has not arrived yet
pub(crate) fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .block(panel(title));
    frame.render_widget(paragraph, area);
}
