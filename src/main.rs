//! Report upload relay.
//!
//! Accepts credit-report uploads from the browser, validates them and
//! forwards them to the reports service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 UPLOAD RELAY                  │
//!   Browser            │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│  relay   │──▶│  upstream  │──┼──▶ Reports
//!   multipart upload   │  │ server │   │  gates   │   │   client   │  │    service
//!                      │  └────────┘   └──────────┘   └─────┬──────┘  │
//!   ◀──────────────────┼───────────── response relay ◀──────┘         │
//!                      │                                              │
//!                      │  config · security · observability · lifecycle │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use report_relay::config::load_config;
use report_relay::http::HttpServer;
use report_relay::lifecycle::{wait_for_signal, Shutdown};
use report_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "report-relay")]
#[command(about = "Relays credit-report uploads to the reports service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("report-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        use_mocks = config.use_mocks,
        request_timeout_secs = config.timeouts.request_secs,
        max_upload_bytes = config.limits.max_upload_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address format is checked by config validation.
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
