//! canvas-discovery daemon
//!
//! Polls the cloud inventory on a fixed interval and answers allow-listed
//! queries about it over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use canvas_core::{
    GetPollerStatus, PollerActorArgs, QueryService, SnapshotCell, Verbosity, spawn_poller,
    status_channel,
};
use canvas_inventory::InventoryCollector;
use clap::Parser;
use color_eyre::Result;
use tokio::signal;
use tracing::info;

mod api;
mod config;
mod factory;
mod logging;
mod router;
mod state;

use config::Config;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "canvas-discovery")]
#[command(about = "Cloud inventory discovery service", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address from the configuration
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args.config.clone().or_else(Config::locate);
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bind) = args.bind {
        config.daemon.bind = bind;
    }

    let verbosity = Verbosity::new(config.daemon.verbose);
    logging::init(&config.daemon, verbosity.clone())?;

    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => info!("no configuration file found, using defaults"),
    }

    let snapshots = Arc::new(SnapshotCell::new());
    let (status_tx, status_rx) = status_channel();
    let collector = InventoryCollector::new(factory::create_provider(&config.provider))
        .with_timeout(config.poller.timeout());

    let poller = spawn_poller(PollerActorArgs {
        collector,
        snapshots: snapshots.clone(),
        interval: config.poller.interval(),
        status: status_tx,
    });

    let state = AppState::new(QueryService::new(snapshots, verbosity), status_rx);
    let app = router::create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&config.daemon.bind).await?;
    info!(addr = %listener.local_addr()?, "canvas-discovery listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Ok(status) = poller.ask(GetPollerStatus).await {
        info!(
            cycles = status.cycles,
            failures = status.failures,
            last_error = status.last_error.as_deref(),
            "final poller status"
        );
    }
    poller.stop_gracefully().await.ok();

    info!("canvas-discovery stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
