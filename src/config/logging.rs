//! Logging setup
//!
//! Events go to `fintrack.log` in the config directory. Terminal output is
//! reserved for the CLI tables and the TUI, so nothing is written to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// Build the filter, letting `RUST_LOG` take precedence over the configured level
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("finance_tracker={0},fintrack={0}", default_level)))
}

/// Install the global subscriber writing to the log file
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(paths: &TrackerPaths, default_level: &str) -> Result<(), TrackerError> {
    paths.ensure_directories()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .map_err(|e| TrackerError::Io(format!("Failed to open log file: {}", e)))?;

    let _ = tracing_subscriber::registry()
        .with(build_filter(default_level))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();

    Ok(())
}
