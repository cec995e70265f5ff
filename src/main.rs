//! Application shell server (v1)
//!
//! Bootstraps the single-page application root and serves it with Tokio
//! and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  SPA SHELL                    │
//!                         │                                               │
//!   startup               │  ┌────────┐   ┌────────┐   ┌──────────────┐  │
//!   ──────────────────────┼─▶│ config │──▶│ router │──▶│   AppRoot    │  │
//!                         │  └────────┘   └────────┘   │ + theme      │  │
//!                         │                            │ + mount      │  │
//!                         │                            └──────┬───────┘  │
//!                         │                                   │          │
//!   GET /airport          │  ┌────────┐   ┌──────────┐        ▼          │
//!   ──────────────────────┼─▶│  http  │──▶│ resolve  │──▶ render host    │
//!   ◀─────────────────────┼──│ server │◀──│ location │    document       │
//!   200 / 404             │  └────────┘   └──────────┘                   │
//!                         │                                               │
//!                         │  observability (tracing, metrics) · lifecycle │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use spa_shell::app::Document;
use spa_shell::config::loader::load_startup_config;
use spa_shell::lifecycle::signals::shutdown_on_ctrl_c;
use spa_shell::observability::{logging, metrics};
use spa_shell::{Bootstrapper, ShellServer, Shutdown};

#[derive(Parser)]
#[command(name = "spa-shell")]
#[command(about = "Serves the single-page application shell", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_startup_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("spa-shell v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        mode = ?config.router.mode,
        base = %config.router.base,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let document = match &config.server.index_path {
        Some(path) => Document::load(Path::new(path))?,
        None => Document::builtin(),
    };

    let root = Bootstrapper::new(config.clone()).run(document)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = ShellServer::new(root, config.server.clone());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, server_shutdown));

    shutdown_on_ctrl_c(&shutdown).await;
    handle.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
