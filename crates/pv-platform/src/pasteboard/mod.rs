#[cfg(not(target_os = "macos"))]
pub mod common;
#[cfg(target_os = "macos")]
pub mod macos;

// macOS exports
#[cfg(target_os = "macos")]
pub use macos::MacOsPasteboard as LocalPasteboard;

// Windows / Unix exports
#[cfg(not(target_os = "macos"))]
pub use common::CommonPasteboard as LocalPasteboard;
