//! Reports view
//!
//! Insight cards, the overspend banner and a budget-vs-actual bar per
//! category.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::dashboard::render_month_selector;
use super::{panel, render_alert, render_message, usage_color};
use crate::display::format::{format_bar, format_percentage};
use crate::reports::{CategoryBar, MonthlyReport};
use crate::tui::app::App;

const BAR_WIDTH: usize = 30;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [selector_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(8)]).areas(area);
    render_month_selector(frame, app, selector_area);

    let Some(overview) = app.overview.as_ref().filter(|o| o.month == app.month) else {
        match &app.overview_error {
            Some(error) => render_message(frame, body_area, "Reports", error, Color::Red),
            None => render_message(frame, body_area, "Reports", "Loading...", Color::Gray),
        }
        return;
    };
    let report = MonthlyReport::generate(overview, Local::now().date_naive());

    let [cards_area, alert_area, variance_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(body_area);

    render_insights(frame, &report, cards_area);
    render_alert(frame, &report.insights.alert(), alert_area);
    render_variance(frame, &report, variance_area);
}

fn render_insights(frame: &mut Frame, report: &MonthlyReport, area: Rect) {
    let insights = &report.insights;
    let (top_value, top_caption) = match &insights.top_category {
        Some(top) => (top.category.clone(), top.amount.to_string()),
        None => ("None".to_string(), "No spending yet".to_string()),
    };

    let cards = [
        ("Top Category", top_value, top_caption, Color::White),
        (
            "Average Daily",
            insights.average_daily.to_string(),
            format!("Over {} days", insights.days_elapsed),
            Color::White,
        ),
        (
            "Budget Utilization",
            format_percentage(insights.budget_utilization),
            "Of total budget".to_string(),
            usage_color(insights.utilization_level()),
        ),
        (
            "Over Budget",
            insights.over_budget_categories.to_string(),
            "Categories".to_string(),
            if insights.over_budget_categories > 0 {
                Color::Red
            } else {
                Color::Green
            },
        ),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((title, value, caption, color), card_area) in cards.into_iter().zip(areas.iter()) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let lines = vec![
            Line::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Line::styled(caption, Style::default().fg(Color::Gray)),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), *card_area);
    }
}

fn render_variance(frame: &mut Frame, report: &MonthlyReport, area: Rect) {
    let block = panel("Budget vs Actual");
    if report.categories.is_empty() {
        let paragraph = Paragraph::new("No expenses yet").block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = report.categories.iter().map(variance_line).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn variance_line(bar: &CategoryBar) -> Line<'static> {
    let color = if bar.over_budget {
        Color::Red
    } else if bar.has_budget() {
        Color::Green
    } else {
        Color::DarkGray
    };
    Line::from(vec![
        Span::styled(
            format!("{:<16} ", bar.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format_bar(bar.fill, BAR_WIDTH), Style::default().fg(color)),
        Span::raw(format!(" {:>11} / {:<11} ", bar.total.to_string(), bar.budget.to_string())),
        Span::styled(bar.variance_label(), Style::default().fg(color)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTotals, Money};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_variance_line_over_budget() {
        let totals = CategoryTotals::new(Money::from_cents(15000), Money::from_cents(10000), 3);
        let bar = CategoryBar::new("Shopping", &totals);
        let line = variance_line(&bar);

        assert!(text(&line).contains("$50.00 over budget"));
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_variance_line_without_budget() {
        let totals = CategoryTotals::new(Money::from_cents(2500), Money::zero(), 1);
        let bar = CategoryBar::new("Other", &totals);
        assert!(text(&variance_line(&bar)).contains("No budget set"));
    }
}
