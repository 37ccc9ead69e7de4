//! Terminal User Interface module
//!
//! A ratatui front end over the same services the CLI uses: sign in, the
//! monthly dashboard, expense and budget forms, budget settings and reports.
//! Backend requests run on worker threads so the interface stays responsive.

pub mod app;
pub mod event;
pub mod forms;
pub mod handler;
pub mod terminal;
pub mod worker;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
