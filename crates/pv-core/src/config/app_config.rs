use std::path::PathBuf;
use std::time::Duration;

use super::{
    DEFAULT_APP_NAME, DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_TOLERANCE_MS, DEFAULT_PREVIEW_BYTES,
};
use crate::pasteboard::{Namespace, ParseNamespaceError};
use crate::presentation::StabilizationMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid initial namespace: {0}")]
    InvalidNamespace(#[from] ParseNamespaceError),

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Title shown when no type is selected.
    pub app_name: String,

    /// Namespace selected at startup.
    pub initial_namespace: Namespace,

    /// Cadence of change-counter polling.
    pub poll_interval: Duration,

    /// Slack the scheduler may add to a tick before it is reported as late.
    pub poll_tolerance: Duration,

    pub stabilization: StabilizationMode,

    /// Upper bound of payload bytes kept for the detail pane.
    pub preview_bytes: usize,

    /// Directory for log files. `None` leaves the choice to the binary.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Missing keys fall back to the defaults; present keys of the wrong
    /// shape are errors.
    pub fn from_toml(toml_value: &toml::Value) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let app_name = match lookup(toml_value, "general", "app_name") {
            Some(v) => v
                .as_str()
                .ok_or_else(|| invalid("general.app_name", "expected a string"))?
                .to_string(),
            None => defaults.app_name,
        };

        let initial_namespace = match lookup(toml_value, "general", "initial_namespace") {
            Some(v) => v
                .as_str()
                .ok_or_else(|| invalid("general.initial_namespace", "expected a string"))?
                .parse::<Namespace>()?,
            None => defaults.initial_namespace,
        };

        let poll_interval = match lookup(toml_value, "polling", "interval_ms") {
            Some(v) => Duration::from_millis(positive_millis(v, "polling.interval_ms")?),
            None => defaults.poll_interval,
        };

        let poll_tolerance = match lookup(toml_value, "polling", "tolerance_ms") {
            Some(v) => Duration::from_millis(non_negative(v, "polling.tolerance_ms")?),
            None => defaults.poll_tolerance,
        };

        let stabilization = match lookup(toml_value, "view", "stabilize_type_list") {
            Some(v) => match v.as_bool() {
                Some(true) => StabilizationMode::CountDebounce,
                Some(false) => StabilizationMode::Passthrough,
                None => return Err(invalid("view.stabilize_type_list", "expected a boolean")),
            },
            None => defaults.stabilization,
        };

        let preview_bytes = match lookup(toml_value, "view", "preview_bytes") {
            Some(v) => non_negative(v, "view.preview_bytes")? as usize,
            None => defaults.preview_bytes,
        };

        let log_dir = match lookup(toml_value, "logging", "directory") {
            Some(v) => Some(PathBuf::from(
                v.as_str()
                    .ok_or_else(|| invalid("logging.directory", "expected a string"))?,
            )),
            None => defaults.log_dir,
        };

        Ok(Self {
            app_name,
            initial_namespace,
            poll_interval,
            poll_tolerance,
            stabilization,
            preview_bytes,
            log_dir,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            initial_namespace: Namespace::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            poll_tolerance: Duration::from_millis(DEFAULT_POLL_TOLERANCE_MS),
            stabilization: StabilizationMode::default(),
            preview_bytes: DEFAULT_PREVIEW_BYTES,
            log_dir: None,
        }
    }
}

fn lookup<'a>(root: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    root.get(section).and_then(|s| s.get(key))
}

fn invalid(key: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        reason: reason.to_string(),
    }
}

fn non_negative(value: &toml::Value, key: &'static str) -> Result<u64, ConfigError> {
    let n = value
        .as_integer()
        .ok_or_else(|| invalid(key, "expected an integer"))?;
    u64::try_from(n).map_err(|_| invalid(key, "must not be negative"))
}

fn positive_millis(value: &toml::Value, key: &'static str) -> Result<u64, ConfigError> {
    match non_negative(value, key)? {
        0 => Err(invalid(key, "must be greater than zero")),
        n => Ok(n),
    }
}
