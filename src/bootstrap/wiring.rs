//! Dependency wiring: picks the pasteboard source and renderer and builds
//! the session and polling runtime around them.

use std::io;
use std::sync::Arc;

use anyhow::Context;
use pv_app::{SessionOptions, ViewerSession};
use pv_core::ports::{PasteboardSourcePort, RendererPort};
use pv_core::AppConfig;
use pv_platform::adapters::InMemoryPasteboard;
use pv_platform::pasteboard::LocalPasteboard;
use pv_platform::runtime::{PollSchedule, PollingRuntime, ViewerEventReceiver};
use tracing::info;

use crate::cli::Cli;
use crate::renderer::{Deduplicate, JsonRenderer, TerminalRenderer};

pub fn build_source(in_memory: bool) -> anyhow::Result<Arc<dyn PasteboardSourcePort>> {
    if in_memory {
        info!("Using in-memory pasteboard");
        return Ok(Arc::new(InMemoryPasteboard::new()));
    }
    let local = LocalPasteboard::new().context("Failed to open the system pasteboard")?;
    Ok(Arc::new(local))
}

/// Renderer writing to stdout.
pub fn build_renderer(json: bool) -> Box<dyn RendererPort> {
    if json {
        Box::new(Deduplicate::new(JsonRenderer::new(io::stdout())))
    } else {
        Box::new(Deduplicate::new(TerminalRenderer::new(io::stdout())))
    }
}

pub fn build_runtime(
    config: &AppConfig,
    max_turns: Option<u64>,
    source: Arc<dyn PasteboardSourcePort>,
    renderer: Box<dyn RendererPort>,
    events: ViewerEventReceiver,
) -> anyhow::Result<PollingRuntime<ViewerSession>> {
    let schedule = PollSchedule::from_config(config)?;
    let session = ViewerSession::new(source, renderer, SessionOptions::from(config));
    Ok(PollingRuntime::new(session, schedule, events).with_max_turns(max_turns))
}

/// Everything the binary needs from the command line and config.
pub fn build_from_cli(
    cli: &Cli,
    config: &AppConfig,
    events: ViewerEventReceiver,
) -> anyhow::Result<PollingRuntime<ViewerSession>> {
    let source = build_source(cli.in_memory)?;
    let renderer = build_renderer(cli.json);
    build_runtime(config, cli.max_turns, source, renderer, events)
}
