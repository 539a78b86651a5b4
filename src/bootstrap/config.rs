//! Configuration loading.
//!
//! Reads the TOML file and hands the parsed value to
//! [`AppConfig::from_toml`]. An explicitly requested file must exist; the
//! default location is optional and its absence means defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pv_core::AppConfig;

use super::APP_DIR_NAME;

/// `<config dir>/pasteboard-viewer/config.toml`, if the platform has a
/// config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// `<local data dir>/pasteboard-viewer/logs`.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("logs"))
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML, or holds a
/// value of the wrong shape.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Resolve the effective config: the explicit path if given, otherwise the
/// default path when it exists, otherwise built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    resolve_config_from(explicit, default_config_path())
}

fn resolve_config_from(
    explicit: Option<&Path>,
    default_path: Option<PathBuf>,
) -> anyhow::Result<AppConfig> {
    let mut config = match (explicit, default_path) {
        (Some(path), _) => load_config(path)?,
        (None, Some(path)) if path.is_file() => load_config(&path)?,
        _ => AppConfig::default(),
    };

    if config.log_dir.is_none() {
        config.log_dir = default_log_dir();
    }
    Ok(config)
}
