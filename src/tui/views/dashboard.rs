//! Dashboard view
//!
//! Month selector, budget status banner, the four summary cards and a gauge
//! per spending category.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::{hint_line, panel, render_alert, render_message, usage_color};
use crate::display::format_bar;
use crate::reports::{CategoryBar, MonthlyReport, SummaryCard, UsageLevel};
use crate::tui::app::App;

const COMPACT_BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [selector_area, body_area, buttons_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .areas(area);

    render_month_selector(frame, app, selector_area);
    frame.render_widget(
        Paragraph::new(hint_line(&[
            ("e", "Add Expense"),
            ("b", "Add Budget"),
            ("s", "Budget Settings"),
            ("r", "Reports"),
        ])),
        buttons_area,
    );

    let Some(overview) = app.overview.as_ref().filter(|o| o.month == app.month) else {
        match &app.overview_error {
            Some(error) => render_message(frame, body_area, "Dashboard", error, Color::Red),
            None => render_message(frame, body_area, "Dashboard", "Loading...", Color::Gray),
        }
        return;
    };
    let report = MonthlyReport::generate(overview, Local::now().date_naive());

    let [alert_area, cards_area, categories_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(3),
    ])
    .areas(body_area);

    render_alert(frame, &report.status, alert_area);
    render_cards(frame, &report, cards_area);
    render_categories(frame, &report, categories_area);
}

pub(crate) fn render_month_selector(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled("◀ [ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.month.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ] ▶", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_cards(frame: &mut Frame, report: &MonthlyReport, area: Rect) {
    let cards = crate::reports::summary_cards(&report.summary);
    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (card, card_area) in cards.iter().zip(areas.iter()) {
        render_card(frame, card, card_value_color(card, report), *card_area);
    }
}

fn card_value_color(card: &SummaryCard, report: &MonthlyReport) -> Color {
    match card.title {
        "Remaining" if report.summary.remaining_budget.is_negative() => Color::Red,
        "Remaining" => Color::Green,
        "Budget Usage" => usage_color(report.usage_level()),
        _ => Color::White,
    }
}

fn render_card(frame: &mut Frame, card: &SummaryCard, color: Color, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", card.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let lines = vec![
        Line::styled(
            card.value.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Line::styled(card.caption.clone(), Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_categories(frame: &mut Frame, report: &MonthlyReport, area: Rect) {
    let block = panel("Spending by Category");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if report.categories.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::styled("No expenses yet", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(
                "Start tracking your expenses to see spending patterns.",
                Style::default().fg(Color::Gray),
            ),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    if report.categories.len() * 2 > height {
        let lines = compact_lines(&report.categories, height);
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    // Two rows per category: caption line then gauge
    let rows = Layout::vertical(vec![Constraint::Length(2); report.categories.len()]).split(inner);
    for (bar, row) in report.categories.iter().zip(rows.iter()) {
        let [caption_area, gauge_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(*row);

        let caption = Line::from(vec![
            Span::styled(
                format!("{:<16}", bar.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} / {}  ", bar.total, bar.budget)),
            Span::styled(
                format!("{} transactions, {}", bar.count, bar.remaining_label()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(caption), caption_area);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(bar_color(bar)).bg(Color::Black))
            .ratio(bar.fill.clamp(0.0, 1.0))
            .label(format!("{:.0}%", bar.fill * 100.0));
        frame.render_widget(gauge, gauge_area);
    }
}

fn bar_color(bar: &CategoryBar) -> Color {
    if bar.over_budget {
        usage_color(UsageLevel::High)
    } else {
        usage_color(UsageLevel::from_percent(bar.fill * 100.0))
    }
}

/// One line per category for panels too short for gauges. When even that
/// overflows, the last line counts the categories left out.
fn compact_lines(bars: &[CategoryBar], height: usize) -> Vec<Line<'static>> {
    let shown = if bars.len() > height {
        height.saturating_sub(1)
    } else {
        bars.len()
    };

    let mut lines: Vec<Line> = bars[..shown]
        .iter()
        .map(|bar| {
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", bar.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format_bar(bar.fill, COMPACT_BAR_WIDTH),
                    Style::default().fg(bar_color(bar)),
                ),
                Span::raw(format!(" {:>4.0}%  ", bar.fill * 100.0)),
                Span::styled(bar.remaining_label(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    if shown < bars.len() {
        lines.push(Line::styled(
            format!("… {} more", bars.len() - shown),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines
}
