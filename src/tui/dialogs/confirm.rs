//! Confirmation dialog
//!
//! Yes/no prompt before deleting a budget

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Budget;
use crate::tui::layout::centered_rect_fixed;

/// Prompt text for deleting `budget`
pub fn delete_message(budget: &Budget) -> String {
    let category = budget.category.map(|c| c.name()).unwrap_or("Overall");
    format!(
        "Delete the {} budget of {} for {}?",
        category,
        budget.amount,
        budget.month.label()
    )
}

pub fn render_delete_budget(frame: &mut Frame, budget: &Budget) {
    render(frame, &delete_message(budget));
}

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(54, 8, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, MonthKey};

    #[test]
    fn test_delete_message() {
        let budget = Budget {
            id: "b1".into(),
            category: Some(Category::Entertainment),
            amount: Money::from_cents(7500),
            month: MonthKey::parse("2024-03").unwrap(),
            created_at: None,
            updated_at: None,
        };
        assert_eq!(
            delete_message(&budget),
            "Delete the Entertainment budget of $75.00 for March 2024?"
        );
    }
}
