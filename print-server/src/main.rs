//! print-server — order management backend for an online print shop
//!
//! Long-running process that:
//! - Opens the SQLite store and applies migrations
//! - Runs the durable notification worker (deferred confirmations)
//! - Exposes the service layer to the transport boundary

use print_server::{AppState, Config};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    print_server::init_logger_with_file(None, config.log_dir.as_deref());

    tracing::info!("Starting print-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;

    // Durable notification worker — picks up anything left from a
    // previous run, then scans on an interval
    let worker = state.notify_worker();
    let worker_handle = tokio::spawn(worker.run());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping");
    worker_handle.abort();

    Ok(())
}
