//! Facility directory service.
//!
//! JSON API and sitemaps for a state / city / facility directory, plus lead
//! intake with best-effort spreadsheet forwarding.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────────┐
//!                     │                  DIRECTORY SERVICE                     │
//!                     │                                                        │
//!   Client Request    │  ┌────────────┐   ┌──────────┐   ┌───────────────┐    │
//!   ──────────────────┼─▶│ middleware │──▶│ dispatch │──▶│  route table  │    │
//!                     │  │ id/cors/.. │   │          │   │  (routing)    │    │
//!                     │  └────────────┘   └────┬─────┘   └───────────────┘    │
//!                     │                        │                               │
//!                     │                        ▼                               │
//!                     │                  ┌──────────┐    ┌───────────────┐    │
//!                     │                  │ handlers │───▶│   Directory   │────┼──▶ PostgreSQL
//!                     │                  └────┬─────┘    │ (store)       │    │
//!   Client Response   │                       │          └───────────────┘    │
//!   ◀─────────────────┼───────────────────────┘                               │
//!                     │                  content · sitemap · leads ───────────┼──▶ Sheet endpoint
//!                     └───────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use facility_directory::config::loader::load_config;
use facility_directory::lifecycle::{signals, Shutdown};
use facility_directory::observability::{logging, metrics};
use facility_directory::{store, HttpServer};

#[derive(Parser)]
#[command(name = "facility-directory")]
#[command(about = "Facility directory API server", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "DIRECTORY_CONFIG", default_value = "directory.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = load_config(&args.config)?;
    logging::init_logging(&config.observability);

    tracing::info!("facility-directory v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        postgres = config.database.url.is_some(),
        sheets_forwarding = config.sheets.endpoint.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    // Store before listener: no traffic until data access is ready
    let directory = store::connect(&config.database).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config, directory.clone());
    server.run(listener, &shutdown).await?;

    directory.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
