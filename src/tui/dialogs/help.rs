//! Help dialog
//!
//! Shows keyboard shortcuts for the current page

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, Page};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.current_page()))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(page: Page) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Navigation"),
        Line::from(Span::styled(
            "Dashboard, reports and the budget list",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        key_line("d", "Dashboard"),
        key_line("e", "Add expense"),
        key_line("b", "Add budget"),
        key_line("s", "Budget settings"),
        key_line("r", "Reports"),
        key_line("[ / ]", "Previous / next month"),
        key_line("F5", "Reload the month"),
        key_line("L", "Sign out"),
        key_line("q", "Quit"),
        key_line("Ctrl+C", "Quit from any page"),
        Line::from(""),
        heading("Forms"),
        Line::from(Span::styled(
            "Letters type into fields; press Esc to leave the form first",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        key_line("Tab", "Next field"),
        key_line("Shift+Tab", "Previous field"),
        key_line("← / →", "Change category"),
        key_line("Enter", "Save"),
        key_line("Esc", "Back to dashboard"),
    ];

    if page == Page::BudgetSettings {
        lines.extend([
            Line::from(""),
            heading("Budget Settings"),
            Line::from(""),
            key_line("Tab", "Switch between form and list"),
            key_line("↑ / ↓", "Select budget"),
            key_line("Enter", "Edit amount / save"),
            key_line("x", "Delete budget"),
            key_line("?", "Help (from the list)"),
        ]);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_help_explains_where_hotkeys_apply() {
        let dashboard = text(&help_lines(Page::Dashboard));
        assert!(dashboard.contains("press Esc to leave the form first"));
        assert!(!dashboard.contains("Help (from the list)"));

        let settings = text(&help_lines(Page::BudgetSettings));
        assert!(settings.contains("Help (from the list)"));
    }
}
