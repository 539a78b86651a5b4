//! Process bootstrap: config resolution, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "pasteboard-viewer";
