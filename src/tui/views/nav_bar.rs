//! Navigation bar
//!
//! App title, page tabs with their hotkeys and the signed-in user.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::tui::app::{App, Page};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let user_label = app
        .user()
        .map(|u| format!("{}  [L] Logout ", u.display_label()))
        .unwrap_or_default();

    let [title_area, tabs_area, user_area] = Layout::horizontal([
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Length(user_label.chars().count() as u16),
    ])
    .areas(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        " Finance Tracker",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, title_area);

    if app.user().is_none() {
        return;
    }

    let current = app.current_page();
    let titles: Vec<Line> = Page::NAV
        .iter()
        .map(|page| {
            let hotkey = page.hotkey().map(|c| format!("{}:", c)).unwrap_or_default();
            Line::from(vec![
                Span::styled(hotkey, Style::default().fg(Color::DarkGray)),
                Span::raw(page.title()),
            ])
        })
        .collect();
    let selected = Page::NAV.iter().position(|p| *p == current).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let user = Paragraph::new(Line::from(Span::styled(
        user_label,
        Style::default().fg(Color::White),
    )));
    frame.render_widget(user, user_area);
}
