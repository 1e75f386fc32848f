//! Vehicle service binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum (request id, trace layers)
//!                         │
//!                         ▼
//!                     Dispatcher ──▶ RouteRegistry (match, 404/405)
//!                         │
//!                         ▼
//!                     VehicleService handler ──▶ Repository (Postgres | in-memory)
//!                         │
//!                         ▼
//!                     Reply | Redirect | ErrorEnvelope
//!     ◀──────────────
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use vehicle_service::config::load_config;
use vehicle_service::lifecycle::{shutdown_signal, Shutdown};
use vehicle_service::observability::init_tracing;
use vehicle_service::repository::{InMemoryRepository, PgRepository, Repository};
use vehicle_service::service::{self, VehicleService};
use vehicle_service::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "vehicle-service", version, about = "Hypermedia API for the vehicle registry")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve built-in sample data instead of connecting to PostgreSQL.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    tracing::info!("vehicle-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        database = %config.database.address,
        malformed_id = ?config.service.malformed_id,
        in_memory = cli.in_memory,
        "Configuration loaded"
    );

    let repository: Arc<dyn Repository> = if cli.in_memory {
        Arc::new(InMemoryRepository::fixtures())
    } else {
        Arc::new(PgRepository::from_config(&config.database)?)
    };

    let service = Arc::new(VehicleService::new(repository).with_malformed_id(config.service.malformed_id));
    let server = HttpServer::new(service::dispatcher(service)?);

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.trigger();
        }
    });

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
