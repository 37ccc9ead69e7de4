//! User settings for fintrack
//!
//! Manages the backend location, identity provider keys and display
//! preferences. Every field has a default so older or hand-edited files keep
//! loading.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// Default backend used by the reference deployment
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Identity provider endpoints and key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySettings {
    /// Public web API key of the identity project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the account endpoints (`accounts:signUp`, ...)
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Base URL of the token refresh endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            identity_url: default_identity_url(),
            token_url: default_token_url(),
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the REST backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Identity provider configuration
    #[serde(default)]
    pub identity: IdentitySettings,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_identity_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_token_url() -> String {
    "https://securetoken.googleapis.com/v1".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            identity: IdentitySettings::default(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    ///
    /// `FINTRACK_API_URL` and `FINTRACK_API_KEY` override the stored values
    /// for this process only.
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let mut settings = Self::load_stored(paths)?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Load the settings file as stored, ignoring environment overrides
    pub fn load_stored(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            // Don't save yet - let caller decide when to persist
            Settings::default()
        };

        Ok(settings)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FINTRACK_API_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Ok(key) = std::env::var("FINTRACK_API_KEY") {
            if !key.trim().is_empty() {
                self.identity.api_key = Some(key.trim().to_string());
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            TrackerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Set the backend base URL, trimming any trailing slash
    pub fn set_api_base_url(&mut self, url: &str) -> Result<(), TrackerError> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TrackerError::Validation(format!(
                "Invalid API URL '{}': must start with http:// or https://",
                url
            )));
        }
        self.api_base_url = url.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:5000");
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.identity.api_key.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set_api_base_url("https://api.example.com/").unwrap();
        settings.identity.api_key = Some("key-123".into());
        settings.save(&paths).unwrap();

        let raw = std::fs::read_to_string(paths.settings_file()).unwrap();
        let loaded: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded.api_base_url, "https://api.example.com");
        assert_eq!(loaded.identity.api_key.as_deref(), Some("key-123"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(
            loaded.identity.identity_url,
            "https://identitytoolkit.googleapis.com/v1"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut settings = Settings::default();
        let err = settings.set_api_base_url("localhost:5000").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }
}
