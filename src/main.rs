//! CDR compliance validator sandbox.
//!
//! Serves an echo handler behind the compliance middleware so a data
//! holder's endpoint table, callers and headers can be exercised over HTTP.
//!
//! ```text
//! cdr-validator [CONFIG.toml]
//! ```
//!
//! Without a config file the full standard catalog is served with no
//! registered callers.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use cdr_validator::config::{load_config, ValidatorConfig};
use cdr_validator::identity::InMemoryCallerStore;
use cdr_validator::lifecycle::Shutdown;
use cdr_validator::observability::{logging, metrics};
use cdr_validator::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ValidatorConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("cdr-validator v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoints = config.endpoints.len(),
        callers = config.callers.len(),
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
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let lookup = Arc::new(InMemoryCallerStore::from_config(&config.callers));
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, lookup);
    server.run(listener, shutdown.wait()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
