//! Add-budget page
//!
//! The form is also drawn at the top of the budget settings page.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::add_expense::category_picker;
use super::{error_line, hint_line, panel, rows};
use crate::tui::app::App;
use crate::tui::forms::{BudgetField, BudgetForm};
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect_fixed(64, 14, area);
    frame.render_widget(Clear, card);
    render_form(
        frame,
        &app.budget_form,
        panel("Set Budget"),
        app.is_submitting(),
        "Set Budget",
        card,
    );
}

/// Draw a budget form inside `block`
pub(crate) fn render_form(
    frame: &mut Frame,
    form: &BudgetForm,
    block: Block,
    submitting: bool,
    action: &'static str,
    area: Rect,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = rows(inner, 11);
    frame.render_widget(&form.amount, row[1]);
    frame.render_widget(
        category_picker(
            "Category",
            form.category_label(),
            form.focus == BudgetField::Category,
        ),
        row[3],
    );
    frame.render_widget(&form.month, row[5]);

    let status = match (&form.error, form.preview()) {
        (Some(error), _) => error_line(Some(error.as_str())),
        (None, Some(preview)) => Line::styled(preview, Style::default().fg(Color::Green)),
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(status), row[7]);

    let hints = if submitting {
        Line::styled("Saving...", Style::default().fg(Color::Yellow))
    } else {
        hint_line(&[("Enter", action), ("Esc", "Cancel")])
    };
    frame.render_widget(Paragraph::new(hints), row[9]);
}
