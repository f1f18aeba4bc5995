pub mod settings;

pub use settings::ResolverSettings;

use crate::error::config::ConfigError;
use crate::{CRASH_LOG_TARGET, REQUEST_LOG_TARGET};

use common::ErrorLocation;

use std::collections::HashSet;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "envelope.toml";

pub const ENV_DEBUG: &str = "ENVELOPE_DEBUG";
pub const ENV_ERROR_JSON_MODEL: &str = "ENVELOPE_ERROR_JSON_MODEL";
pub const ENV_SUCCESS_JSON_MODEL: &str = "ENVELOPE_SUCCESS_JSON_MODEL";

// ============================================
// CONFIG STRUCT
// ============================================

/// Resolver configuration as read from `envelope.toml`.
///
/// Model names are looked up in a `SchemaRegistry` when the config is
/// turned into [`ResolverSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub error_json_model: Option<String>,
    pub success_json_model: Option<String>,
    pub error_handler_logger: String,
    pub error_handler_crash_logger: String,
    pub error_handler_signals: Vec<String>,
    pub debug: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            error_json_model: None,
            success_json_model: None,
            error_handler_logger: REQUEST_LOG_TARGET.to_string(),
            error_handler_crash_logger: CRASH_LOG_TARGET.to_string(),
            error_handler_signals: Vec::new(),
            debug: false,
        }
    }
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ResolverConfig {
    /// Load config from {config_dir}/envelope.toml.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config = Self::parse(&contents, &config_path)?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new(CONFIG_FILE_NAME))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: ResolverConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: PathBuf::from(path),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `ENVELOPE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, then re-validate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEBUG) {
            self.debug = parse_flag(ENV_DEBUG, &raw)?;
            debug!("{ENV_DEBUG} override: debug = {}", self.debug);
        }

        if let Some(name) = lookup(ENV_ERROR_JSON_MODEL) {
            debug!("{ENV_ERROR_JSON_MODEL} override: {name}");
            self.error_json_model = Some(name);
        }

        if let Some(name) = lookup(ENV_SUCCESS_JSON_MODEL) {
            debug!("{ENV_SUCCESS_JSON_MODEL} override: {name}");
            self.success_json_model = Some(name);
        }

        self.validate()
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.error_handler_logger.trim().is_empty() {
            return Err(validation_error("error_handler_logger cannot be empty"));
        }

        if self.error_handler_crash_logger.trim().is_empty() {
            return Err(validation_error("error_handler_crash_logger cannot be empty"));
        }

        if self.error_handler_logger == self.error_handler_crash_logger {
            return Err(validation_error(format!(
                "error_handler_logger and error_handler_crash_logger must differ (both '{}')",
                self.error_handler_logger
            )));
        }

        let mut seen = HashSet::new();
        for signal in &self.error_handler_signals {
            if signal.trim().is_empty() {
                return Err(validation_error("error_handler_signals cannot contain empty ids"));
            }
            if !seen.insert(signal.as_str()) {
                return Err(validation_error(format!("Duplicate signal id: {signal}")));
            }
        }

        for (key, name) in [
            ("error_json_model", &self.error_json_model),
            ("success_json_model", &self.success_json_model),
        ] {
            if name.as_deref().is_some_and(|name| name.trim().is_empty()) {
                return Err(validation_error(format!("{key} cannot be empty string")));
            }
        }

        Ok(())
    }
}

/// Load `.env` from the working directory if there is one.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded .env from: {:?}", path);
            Some(path)
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found - using process environment");
            None
        }
        Err(e) => {
            warn!("Failed to parse .env: {}", e);
            None
        }
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(validation_error(format!(
            "{key} must be a boolean flag, got '{other}'"
        ))),
    }
}

#[track_caller]
fn validation_error(reason: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: reason.into(),
    }
}
