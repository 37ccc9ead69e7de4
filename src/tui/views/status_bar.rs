//! Status bar view
//!
//! Shows the selected month, a loading indicator and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, Page};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.current_page();
    let mut spans = vec![Span::styled(
        format!(" {} ", page.title()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    if matches!(page, Page::Dashboard | Page::Reports) {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            app.month.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    let busy = if app.is_submitting() {
        Some("Saving...")
    } else if app.is_loading_overview() || app.is_loading_settings() {
        Some("Loading...")
    } else {
        None
    };
    if let Some(busy) = busy {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(busy, Style::default().fg(Color::Yellow)));
    }

    let hints = hints_for(page);

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hints_for(page: Page) -> &'static str {
    match page {
        Page::SignIn => " Tab:Next  Enter:Submit  Esc:Quit ",
        Page::Dashboard | Page::Reports => " [/]:Month  ?:Help  q:Quit ",
        Page::AddExpense | Page::AddBudget => " Tab:Next  ←/→:Category  Enter:Save  Esc:Back ",
        Page::BudgetSettings => " Tab:Form/List  Enter:Edit  x:Delete  Esc:Back ",
    }
}
