use anyhow::Context;
use clap::Parser;
use pasteboard_viewer::bootstrap::{config::resolve_config, tracing::init_tracing_subscriber, wiring};
use pasteboard_viewer::cli::Cli;
use pasteboard_viewer::input::spawn_stdin_reader;
use pv_core::ports::ViewerEvent;
use pv_platform::runtime::event_channel;
use tracing::{info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    cli.apply_to(&mut config);

    init_tracing_subscriber(config.log_dir.as_deref())
        .context("Failed to initialize tracing")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        namespace = %config.initial_namespace,
        stabilization = ?config.stabilization,
        interval_ms = config.poll_interval.as_millis() as u64,
        "Starting Pasteboard Viewer"
    );

    let (events_tx, events_rx) = event_channel(EVENT_CHANNEL_CAPACITY);

    if let Err(e) = spawn_stdin_reader(events_tx.clone()) {
        warn!(error = %e, "Failed to start input thread, running without commands");
    }

    let shutdown_tx = events_tx;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown_tx.send(ViewerEvent::Quit).await;
        }
    });

    let mut runtime = wiring::build_from_cli(&cli, &config, events_rx)?;
    let summary = runtime.run().await?;

    info!(
        turns = summary.turns,
        late_ticks = summary.late_ticks,
        stop = ?summary.stop,
        "Pasteboard Viewer stopped"
    );
    Ok(())
}
