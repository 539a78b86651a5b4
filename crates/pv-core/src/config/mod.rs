//! # Configuration DTO
//!
//! Maps a parsed TOML document onto [`AppConfig`]. Reading the file is the
//! binary's job; this module only interprets values.

mod app_config;

pub use app_config::{AppConfig, ConfigError};

pub const DEFAULT_APP_NAME: &str = "Pasteboard Viewer";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_POLL_TOLERANCE_MS: u64 = 300;
pub const DEFAULT_PREVIEW_BYTES: usize = 4096;
