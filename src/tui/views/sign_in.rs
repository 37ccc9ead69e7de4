//! Sign-in page
//!
//! Email and password sign in, account creation and guest access.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{error_line, hint_line, panel, rows};
use crate::tui::app::App;
use crate::tui::forms::{AuthField, AuthMode};
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.sign_in_form;
    let height = if form.mode == AuthMode::SignUp { 18 } else { 16 };
    let card = centered_rect_fixed(56, height, area);
    frame.render_widget(Clear, card);

    let block = panel(form.mode.label());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let row = rows(inner, inner.height as usize);
    let mut next = 0;
    let mut take = || {
        let r = row.get(next).copied().unwrap_or_default();
        next += 1;
        r
    };

    let heading = Paragraph::new(vec![
        Line::styled(
            "Finance Tracker",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Manage your expenses and budgets",
            Style::default().fg(Color::Gray),
        ),
    ])
    .alignment(Alignment::Center);
    let heading_area = take();
    let heading_area = Rect {
        height: 2,
        ..heading_area
    };
    take();
    frame.render_widget(heading, heading_area);
    take();

    frame.render_widget(mode_tabs(form.mode, form.focus == AuthField::Mode), take());
    take();
    frame.render_widget(&form.email, take());
    take();
    frame.render_widget(&form.password, take());
    take();
    if form.mode == AuthMode::SignUp {
        frame.render_widget(&form.confirm, take());
        take();
    }

    frame.render_widget(
        Paragraph::new(error_line(form.error.as_deref())).alignment(Alignment::Center),
        take(),
    );

    let guest_style = if form.focus == AuthField::Guest {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" Continue as Guest ", guest_style)))
            .alignment(Alignment::Center),
        take(),
    );
    take();
    frame.render_widget(
        Paragraph::new(hint_line(&[("Enter", form.mode.label()), ("Tab", "Next")]))
            .alignment(Alignment::Center),
        take(),
    );
}

fn mode_tabs(mode: AuthMode, focused: bool) -> Paragraph<'static> {
    let tab = |m: AuthMode| {
        let style = if m == mode {
            let base = Style::default().add_modifier(Modifier::BOLD);
            if focused {
                base.fg(Color::Black).bg(Color::Cyan)
            } else {
                base.fg(Color::Yellow)
            }
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", m.label()), style)
    };
    Paragraph::new(Line::from(vec![
        tab(AuthMode::SignIn),
        Span::raw("  "),
        tab(AuthMode::SignUp),
    ]))
    .alignment(Alignment::Center)
}
