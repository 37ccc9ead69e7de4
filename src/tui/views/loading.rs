//! Loading screen shown while the saved session is checked

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "Finance Tracker",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled("Loading...", Style::default().fg(Color::Gray)),
    ];
    let paragraph = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, centered_rect_fixed(30, 3, area));
}
