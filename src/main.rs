//! Bundled SOL transfer service.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /transfer
//!     ──────────────▶ http ──▶ transfer::TransferService
//!                               │
//!                               ├─ validation   (≤ 5 recipients, amounts, addresses)
//!                               ├─ balance      (reserve, test-network airdrop) ──▶ ledger RPC
//!                               ├─ blockchain   (one blockhash, N signed transactions)
//!                               └─ submitter    (sendBundle ──▶ relay, confirm ──▶ ledger RPC)
//!
//!     Cross-cutting: config (TOML + env), observability (tracing, Prometheus),
//!     lifecycle (startup, SIGINT/SIGTERM shutdown)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use bundle_transfer::config::load_config;
use bundle_transfer::lifecycle::{build_state, signals, Shutdown};
use bundle_transfer::observability::{logging, metrics};
use bundle_transfer::HttpServer;

#[derive(Parser)]
#[command(name = "bundle-transfer")]
#[command(about = "Submits multi-recipient SOL transfers as one atomic bundle", long_about = None)]
struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "BUNDLE_TRANSFER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet.
            eprintln!("bundle-transfer: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bundle-transfer starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.ledger.rpc_url,
        test_network = config.ledger.test_network,
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

    let state = build_state(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::wait_for_termination(shutdown.clone()));

    HttpServer::new(config, state).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
