//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod budget;
pub mod config;
pub mod expense;
pub mod report;

pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{
    handle_dashboard_command, handle_health_command, handle_report_command, ExportFormat,
};

use tracing::debug;

use crate::api::ApiClient;
use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};
use crate::session::{self, AppSession, SessionStore, User};

/// Paths and settings shared by every command
pub struct CliContext {
    pub paths: TrackerPaths,
    pub settings: Settings,
}

/// A signed-in user and a client carrying their token
pub struct SignedIn {
    pub user: User,
    pub api: ApiClient,
}

impl CliContext {
    pub fn new(paths: TrackerPaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    /// Client for the configured backend, without credentials
    pub fn api_client(&self) -> TrackerResult<ApiClient> {
        ApiClient::new(&self.settings.api_base_url, self.settings.request_timeout())
    }

    pub fn open_session(&self) -> TrackerResult<AppSession> {
        Ok(session::open(&self.paths, &self.settings)?)
    }

    /// Resume the saved session, refreshing its token when needed
    pub fn signed_in(&self) -> TrackerResult<SignedIn> {
        if SessionStore::new(&self.paths).load()?.is_none() {
            return Err(TrackerError::NotSignedIn);
        }

        let mut session = self.open_session()?;
        session.restore()?;
        let token = session.ensure_fresh()?.cloned();
        let user = session.user().cloned().ok_or(TrackerError::NotSignedIn)?;
        debug!(uid = %user.uid, "using saved session");

        let mut api = self.api_client()?;
        api.set_token(token);
        Ok(SignedIn { user, api })
    }
}
