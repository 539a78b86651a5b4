//! Pasteboard Viewer binary support: CLI, bootstrap, renderers and the
//! stdin input adapter. The viewer logic itself lives in the `pv-*` crates.

pub mod bootstrap;
pub mod cli;
pub mod input;
pub mod renderer;
