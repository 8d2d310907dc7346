//! Route-table server.
//!
//! Serves the routes of a TOML file. Every request is resolved through the
//! radix router and answered with the route's fixed body or a JSON echo of
//! the pieces the route asked for.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌─────────┐    ┌──────────────┐    ┌──────────────┐
//!     ────────────────────▶│  http   │───▶│   routing    │───▶│   handler    │
//!                          │ server  │    │ tree (per    │    │ input from   │
//!     Client Response      │         │◀───│   method)    │◀───│ capabilities │
//!     ◀────────────────────│         │    └──────▲───────┘    └──────────────┘
//!                          └─────────┘           │ ArcSwap
//!                                         ┌──────┴───────┐
//!                                         │    config    │
//!                                         │ load/validate│
//!                                         │ watch/reload │
//!                                         └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use radix_router::config::load_config;
use radix_router::config::watcher::ConfigWatcher;
use radix_router::lifecycle::{signals, Shutdown};
use radix_router::observability::{logging, metrics};
use radix_router::HttpServer;

#[derive(Parser)]
#[command(name = "radix-router")]
#[command(about = "Serve a route table over HTTP", long_about = None)]
struct Args {
    /// Route file (TOML).
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the route table when the file changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!("radix-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        path = %args.config.display(),
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let _watcher = if args.watch {
        Some(ConfigWatcher::new(&args.config, server.table()).run()?)
    } else {
        None
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
