//! # axura-server
//!
//! Mock API for the Axura admin console. Serves the twelve seeded users
//! over HTTP with artificial latency so the console can be exercised
//! against something that behaves like a remote backend.

use tracing::info;
use tracing_subscriber::EnvFilter;

use axura_server::{AppState, ServerConfig};
use axura_store::UserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,axura_server=debug,tower_http=debug")),
        )
        .init();

    info!("Starting Axura mock API v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Seed the dataset
    // -----------------------------------------------------------------------
    let users = UserStore::seeded();
    info!(count = users.len(), "Seeded mock users");

    let http_addr = config.http_addr;
    let app_state = AppState::new(config, users);

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server until it fails or Ctrl+C arrives
    // -----------------------------------------------------------------------
    tokio::select! {
        result = axura_server::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
