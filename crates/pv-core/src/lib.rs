//! # pv-core
//!
//! Core domain models and business logic for Pasteboard Viewer.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! the selection state machine, change detection, list stabilization and
//! title presentation. Everything that touches the OS lives behind the
//! ports in [`ports`].

pub mod config;
pub mod detection;
pub mod pasteboard;
pub mod ports;
pub mod presentation;
pub mod selection;
pub mod turn;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use detection::{ChangeDetector, Observation};
pub use pasteboard::{ChangeCounter, Namespace, ParseNamespaceError, TypeIdentifier};
pub use presentation::{
    title, DetailPane, Frame, ListStabilizer, PayloadPreview, StabilizationMode,
    StabilizedTypeList,
};
pub use selection::{SelectionController, SelectionPhase, SelectionState};
pub use turn::{Deferred, NextTurnQueue};
