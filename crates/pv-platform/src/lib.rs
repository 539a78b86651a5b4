//! # pv-platform
//!
//! Platform-specific implementations for Pasteboard Viewer.
//!
//! This crate contains the adapters that talk to the operating system
//! pasteboard and the polling runtime that drives the viewer's event loop.

pub mod adapters;
pub mod pasteboard;
pub mod runtime;
