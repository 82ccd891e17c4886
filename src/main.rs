//! Taskboard HTTP server.
//!
//! Usage:
//!
//! ```text
//! taskboard [--bind 127.0.0.1:5000] [--data-file data.json] [--log-filter taskboard=debug]
//! ```
//!
//! Every flag can also be supplied through its `TASKBOARD_*` environment
//! variable. The board is loaded from the data file at startup and rewritten
//! after every accepted mutation.

use std::sync::Arc;

use clap::Parser;
use taskboard::{
    board::{adapters::json_file::JsonFileSnapshotStore, services::TaskTrackerService},
    config::ServerConfig,
    http, telemetry,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::parse();
    telemetry::init(config.log_filter.as_deref())?;
    let addr = config.bind_addr()?;

    let store = Arc::new(JsonFileSnapshotStore::new(config.data_file.clone()));
    let tracker = Arc::new(TaskTrackerService::open(store).await?);
    let router = http::create_router(tracker);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, data_file = %config.data_file, "taskboard listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("taskboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
