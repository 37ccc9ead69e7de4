//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Instant;
use tracing::info;

use crate::api::ApiClient;
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::session;

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_key;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(paths: &TrackerPaths, settings: &Settings) -> Result<()> {
    let session = session::open(paths, settings)?;
    let api = ApiClient::new(&settings.api_base_url, settings.request_timeout())?;

    let mut terminal = init_terminal()?;
    let mut app = App::new(session, api);

    // The saved session may need a network refresh; show something meanwhile
    terminal.draw(|frame| super::views::render(frame, &mut app))?;
    app.restore_session();

    let result = event_loop(&mut terminal, &mut app);

    restore_terminal()?;
    info!("tui closed");
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let events = EventHandler::default();

    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key(app, key),
            // Terminal will redraw automatically
            Event::Resize(_, _) => {}
            Event::Tick => app.tick(Instant::now()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
