use clap::Parser;
use log::{error, info};
use server::config::{self, ServerConfig};
use server::network::Server;
use server::records::RecordsStore;
use std::sync::Arc;

/// Main-method of the application.
/// Parses command-line arguments, loads the leaderboard and serves clients until Ctrl+C.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(hint) = config::log_hint(std::env::var("RUST_LOG").ok().as_deref()) {
        eprintln!("{}", hint);
    }
    env_logger::init();

    let config = ServerConfig::parse();
    info!(
        "Starting Blackjack server on {} (records: {})",
        config.address(),
        config.records_file.display()
    );

    let records = Arc::new(RecordsStore::load(&config.records_file, config.max_records).await);
    let server = Server::bind(&config, records).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C, shutting down gracefully...");
        })
        .await?;

    Ok(())
}
