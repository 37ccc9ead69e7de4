//! Configuration CLI commands

use clap::Subcommand;
use tracing::info;

use super::CliContext;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Set the backend base URL
    SetApiUrl {
        /// Base URL, e.g. http://localhost:5000
        url: String,
    },

    /// Set the identity service API key
    SetApiKey {
        key: String,
    },
}

/// Handle a config command
pub fn handle_config_command(ctx: &CliContext, cmd: ConfigCommands) -> TrackerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let paths = &ctx.paths;
            let settings = &ctx.settings;

            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  API URL:          {}", settings.api_base_url);
            println!("  Request timeout:  {}s", settings.request_timeout_secs);
            println!("  Identity URL:     {}", settings.identity.identity_url);
            println!("  Token URL:        {}", settings.identity.token_url);
            println!(
                "  Identity API key: {}",
                if settings.identity.api_key.is_some() {
                    "configured"
                } else {
                    "not set"
                }
            );
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Log level:        {}", settings.log_level);
        }

        ConfigCommands::SetApiUrl { url } => {
            let mut stored = Settings::load_stored(&ctx.paths)?;
            stored.set_api_base_url(&url)?;
            stored.save(&ctx.paths)?;
            info!(url = %stored.api_base_url, "api url updated");
            println!("API URL set to {}", stored.api_base_url);
        }

        ConfigCommands::SetApiKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                return Err(TrackerError::Validation("API key cannot be empty".into()));
            }
            let mut stored = Settings::load_stored(&ctx.paths)?;
            stored.identity.api_key = Some(key.to_string());
            stored.save(&ctx.paths)?;
            info!("identity api key updated");
            println!("Identity API key saved.");
        }
    }

    Ok(())
}
