//! caddy-routes daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ config ──▶ RouteSync ──▶ Reconciler ──▶ AdminClient ──▶ Caddy admin API
//!                                  │              │
//!                                  │              └── canonical equality (skip when equal)
//!                                  └── fixed interval, single task
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast;

use caddy_routes::config::load_config;
use caddy_routes::observability::logging;
use caddy_routes::sync::RouteSync;

#[derive(Parser)]
#[command(name = "caddy-routes")]
#[command(about = "Keep Caddy reverse-proxy routes in sync with a config file", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "caddy-routes.toml")]
    config: PathBuf,

    /// Run a single sync pass and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.observability);

    tracing::info!(
        config = %cli.config.display(),
        admin_url = %config.admin.url,
        server_key = %config.server.key,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let sync = RouteSync::from_config(&config)?;

    if config.server.seed_base_config {
        sync.seed(config.admin.bootstrap_url.as_deref(), config.server.listen_port).await?;
    }

    if cli.once || !config.refresh.enabled {
        let report = sync.sync_all().await;
        tracing::info!(
            unchanged = report.unchanged,
            created = report.created,
            replaced = report.replaced,
            failed = ?report.failed,
            "Sync finished"
        );
        return Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let interval = Duration::from_secs(config.refresh.interval_secs);
    let handle = tokio::spawn(sync.run(interval, shutdown_rx));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(());
    handle.await?;

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
