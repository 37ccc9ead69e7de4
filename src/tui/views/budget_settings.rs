//! Budget settings page
//!
//! Add form on top, then every budget of the last twelve months grouped by
//! month, newest first. List rows can be edited in place or deleted.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::add_budget::render_form;
use super::{panel, render_message};
use crate::tui::app::App;
use crate::tui::forms::{BudgetSettingsState, SettingsFocus};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.budget_settings;
    let [form_area, list_area] =
        Layout::vertical([Constraint::Length(13), Constraint::Min(4)]).areas(area);

    let mut form_block = panel("Add Budget");
    if state.focus != SettingsFocus::Form {
        form_block = form_block.border_style(Style::default().fg(Color::DarkGray));
    }
    render_form(
        frame,
        &state.form,
        form_block,
        app.is_submitting(),
        "Add Budget",
        form_area,
    );

    if let Some(error) = &state.error {
        render_message(frame, list_area, "Budgets", error, Color::Red);
        return;
    }
    if !state.loaded {
        render_message(frame, list_area, "Budgets", "Loading...", Color::Gray);
        return;
    }
    if state.groups.is_empty() {
        render_message(
            frame,
            list_area,
            "Budgets",
            "No budgets found. Add your first budget above.",
            Color::Gray,
        );
        return;
    }

    let mut block = panel("Budgets");
    if state.focus != SettingsFocus::List {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    }
    let inner_height = block.inner(list_area).height;
    let (lines, selected_line) = list_lines(state);
    let scroll = selected_line.saturating_sub(inner_height.saturating_sub(1) as usize);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, list_area);
}

/// Lines for the grouped list and the index of the selected row's line
fn list_lines(state: &BudgetSettingsState) -> (Vec<Line<'static>>, usize) {
    let list_focused = state.focus == SettingsFocus::List;
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut index = 0;

    for group in &state.groups {
        lines.push(Line::from(vec![
            Span::styled(
                group.month.label(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Total Budget: {}", group.total),
                Style::default().fg(Color::Gray),
            ),
        ]));

        for budget in &group.budgets {
            let selected = list_focused && index == state.selected;
            if selected {
                selected_line = lines.len();
            }
            let label = budget.category.map(|c| c.name()).unwrap_or("Overall");
            let editing = state
                .editing
                .as_ref()
                .filter(|e| selected && e.budget.id == budget.id);

            match editing {
                Some(edit) => {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  ▸ {:<20}", label),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(
                            format!("${}▏", edit.amount.value()),
                            Style::default().fg(Color::Black).bg(Color::Cyan),
                        ),
                        Span::styled(
                            "  Enter:Save  Esc:Cancel",
                            Style::default().fg(Color::Gray),
                        ),
                    ]));
                    if let Some(error) = &edit.error {
                        lines.push(Line::styled(
                            format!("    {}", error),
                            Style::default().fg(Color::Red),
                        ));
                    }
                }
                None => {
                    let style = if selected {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let marker = if selected { "▸" } else { " " };
                    lines.push(Line::styled(
                        format!("  {} {:<20}{:>14}", marker, label, budget.amount.to_string()),
                        style,
                    ));
                }
            }
            index += 1;
        }
        lines.push(Line::from(""));
    }

    (lines, selected_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Money, MonthKey};
    use crate::tui::forms::BudgetSettingsState;

    fn budget(id: &str, category: Option<Category>, month: &str) -> Budget {
        Budget {
            id: id.into(),
            category,
            amount: Money::from_cents(50000),
            month: MonthKey::parse(month).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_groups_newest_first_with_totals() {
        let mut state = BudgetSettingsState::new(&MonthKey::parse("2024-02").unwrap());
        state.set_budgets(vec![
            budget("a", None, "2024-01"),
            budget("b", Some(Category::Travel), "2024-02"),
        ]);
        let (lines, _) = list_lines(&state);

        assert!(text(&lines[0]).starts_with("February 2024"));
        assert!(text(&lines[0]).contains("Total Budget: $500.00"));
        assert!(text(&lines[1]).contains("Travel"));
        assert!(text(&lines[3]).starts_with("January 2024"));
        assert!(text(&lines[4]).contains("Overall"));
    }

    #[test]
    fn test_selected_line_tracks_selection() {
        let mut state = BudgetSettingsState::new(&MonthKey::parse("2024-02").unwrap());
        state.set_budgets(vec![
            budget("a", None, "2024-01"),
            budget("b", Some(Category::Travel), "2024-02"),
        ]);
        state.toggle_focus();
        state.select_next();
        let (_, selected_line) = list_lines(&state);
        assert_eq!(selected_line, 4);

        state.start_edit();
        let (lines, _) = list_lines(&state);
        assert!(text(&lines[4]).contains("$500.00"));
        assert!(text(&lines[4]).contains("Enter:Save"));
    }
}
