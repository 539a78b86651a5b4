use std::path::PathBuf;

use clap::Parser;
use pv_core::{AppConfig, Namespace, StabilizationMode};

/// Inspect every representation on the system pasteboards.
#[derive(Parser, Debug, Default)]
#[command(name = "pasteboard-viewer", version, about)]
pub struct Cli {
    /// Config file. Defaults to `<config dir>/pasteboard-viewer/config.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Namespace shown at startup (general, find, font, ruler, drag).
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<Namespace>,

    /// Show type lists as read, without the empty frame on count changes.
    #[arg(long)]
    pub no_stabilize: bool,

    /// Stop after this many turns.
    #[arg(long, value_name = "N")]
    pub max_turns: Option<u64>,

    /// Emit one JSON object per frame instead of the text view.
    #[arg(long)]
    pub json: bool,

    /// Read from an empty in-memory pasteboard instead of the system one.
    #[arg(long)]
    pub in_memory: bool,
}

impl Cli {
    /// Command line flags win over the config file.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(namespace) = self.namespace {
            config.initial_namespace = namespace;
        }
        if self.no_stabilize {
            config.stabilization = StabilizationMode::Passthrough;
        }
    }
}
