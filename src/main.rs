//! Address book service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ request id ─▶ trace ─▶ metrics ─▶ error responder ─▶ router
//!                                                                   │
//!              ┌────────────────────────────────────────────────────┤
//!              ▼                          ▼                          ▼
//!        GET /address             POST /address               DELETE /address/{id}
//!              │                    bearer gate                  bearer gate
//!              │                    validation rules                  │
//!              ▼                          ▼                          ▼
//!        ┌──────────────────────────────────────────────────────────────┐
//!        │                AddressStore (RwLock<Vec<_>>)                 │
//!        └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from the environment (`API_TOKEN`, `APP_ENV`,
//! `PORT`, ...), optionally via a `.env` file.

use tokio::net::TcpListener;

use address_service::config::load_from_env;
use address_service::lifecycle::signals::spawn_signal_handler;
use address_service::observability::{logging, metrics};
use address_service::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;

    logging::init_logging(&config.observability, config.environment)?;

    tracing::info!("address-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = %config.environment,
        bind_address = %config.listener.bind_address,
        public_url = %config.public_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
