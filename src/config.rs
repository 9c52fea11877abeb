//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{Endpoints, Resource, DEFAULT_API_BASE};
use crate::state::{ErrorMergePolicy, DEFAULT_TREND_WINDOW};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub refresh: RefreshSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_leads_path")]
    pub leads_path: String,

    #[serde(default = "default_stats_path")]
    pub stats_path: String,

    #[serde(default = "default_errors_path")]
    pub errors_path: String,

    /// Unset means requests may hang until the backend answers
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_leads_path() -> String {
    Resource::Leads.default_path().to_string()
}

fn default_stats_path() -> String {
    Resource::Stats.default_path().to_string()
}

fn default_errors_path() -> String {
    Resource::Errors.default_path().to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            leads_path: default_leads_path(),
            stats_path: default_stats_path(),
            errors_path: default_errors_path(),
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// Absolute URLs of the three endpoints
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::with_paths(
            &self.base_url,
            &self.leads_path,
            &self.stats_path,
            &self.errors_path,
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Refresh loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSettings {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    #[serde(default)]
    pub error_policy: ErrorMergePolicy,
}

fn default_interval() -> u64 {
    4 * 60 * 60 // 4 hours
}

fn default_trend_window() -> usize {
    DEFAULT_TREND_WINDOW
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            trend_window: default_trend_window(),
            error_policy: ErrorMergePolicy::default(),
        }
    }
}

impl RefreshSettings {
    /// Refresh period, never shorter than one second
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment, logging what was found.
    ///
    /// Call after the subscriber is installed, otherwise use [`Self::discover`].
    pub fn load_default() -> Self {
        let (config, report) = Self::discover();
        report.log();
        config
    }

    /// Search the default locations without logging
    pub fn discover() -> (Self, LoadReport) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("leadwatch").join("config.toml")),
            Some(PathBuf::from("/etc/leadwatch/config.toml")),
            Some(PathBuf::from("./leadwatch.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&config_paths)
    }

    /// First existing file of `paths` that loads wins. Files that exist but
    /// fail to load are recorded and skipped.
    pub fn discover_in(paths: &[PathBuf]) -> (Self, LoadReport) {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    let report = LoadReport {
                        source: ConfigSource::File(path.clone()),
                        failures,
                    };
                    return (config, report);
                }
                Err(e) => failures.push(e),
            }
        }

        let report = LoadReport {
            source: ConfigSource::Defaults,
            failures,
        };
        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any `LEADWATCH_*` lookup. Unparsable numbers are
    /// ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend overrides
        if let Some(url) = lookup("LEADWATCH_API_URL") {
            self.backend.base_url = url;
        }

        // Refresh overrides
        if let Some(secs) = lookup("LEADWATCH_REFRESH_SECS") {
            if let Ok(s) = secs.parse() {
                self.refresh.interval_secs = s;
            }
        }
        if let Some(window) = lookup("LEADWATCH_TREND_WINDOW") {
            if let Ok(w) = window.parse() {
                self.refresh.trend_window = w;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("LEADWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LEADWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Built-in defaults plus environment overrides
    Defaults,
}

/// Outcome of [`Config::discover`], kept until logging is up
#[derive(Debug)]
pub struct LoadReport {
    pub source: ConfigSource,
    pub failures: Vec<ConfigError>,
}

impl LoadReport {
    pub fn log(&self) {
        for failure in &self.failures {
            tracing::warn!("{}", failure);
        }

        match &self.source {
            ConfigSource::File(path) => tracing::info!("Loaded config from {:?}", path),
            ConfigSource::Defaults => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Leadwatch Configuration
#
# Environment variables override these settings:
# - LEADWATCH_API_URL
# - LEADWATCH_REFRESH_SECS
# - LEADWATCH_TREND_WINDOW
# - LEADWATCH_LOG_LEVEL
# - LEADWATCH_LOG_FORMAT

[backend]
# Lead pipeline API base URL
base_url = "http://localhost:5000"

# Resource paths below the base URL
leads_path = "/api/leads"
stats_path = "/api/stats"
errors_path = "/api/errors"

# Per-request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[refresh]
# Seconds between fetch cycles (4 hours)
interval_secs = 14400

# Number of samples kept for the trend chart
trend_window = 6

# How backend-reported errors merge into the error log:
# accumulate (append to the log) or replace (swap the log for the latest list)
error_policy = "accumulate"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
