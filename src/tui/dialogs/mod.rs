//! Dialog modules for the TUI
//!
//! Modal dialogs drawn over the current page

pub mod confirm;
pub mod help;
