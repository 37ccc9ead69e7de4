//! Add-expense page

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{error_line, hint_line, panel, rows};
use crate::tui::app::App;
use crate::tui::forms::ExpenseField;
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.expense_form;
    let card = centered_rect_fixed(64, 15, area);
    frame.render_widget(Clear, card);

    let block = panel("Add New Expense");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let row = rows(inner, 13);
    frame.render_widget(&form.amount, row[1]);
    frame.render_widget(
        category_picker(
            "Category",
            form.category.name(),
            form.focus == ExpenseField::Category,
        ),
        row[3],
    );
    frame.render_widget(&form.date, row[5]);
    frame.render_widget(&form.note, row[7]);

    frame.render_widget(Paragraph::new(error_line(form.error.as_deref())), row[9]);

    let hints = if app.is_submitting() {
        Line::styled("Adding...", Style::default().fg(Color::Yellow))
    } else {
        hint_line(&[("Enter", "Add Expense"), ("Esc", "Cancel")])
    };
    frame.render_widget(Paragraph::new(hints), row[11]);
}

/// A labelled "◀ value ▶" selector row
pub(crate) fn category_picker(label: &str, value: &str, focused: bool) -> Paragraph<'static> {
    let label_color = if focused { Color::Cyan } else { Color::Gray };
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    Paragraph::new(Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(label_color)),
        Span::raw(": "),
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), value_style),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]))
}
