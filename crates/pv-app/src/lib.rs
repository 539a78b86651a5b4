//! # pv-app
//!
//! Application layer for Pasteboard Viewer: the per-turn viewer session and
//! the use cases it runs.

pub mod session;
pub mod usecases;

pub use session::{SessionOptions, ViewerSession};
pub use usecases::ReadRepresentation;
