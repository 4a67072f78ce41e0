//! Server configuration.

use clap::Parser;
use shared::{
    CONNECTION_TIMEOUT_MS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MAX_RECORDS,
    TOP_RECORDS_DISPLAY,
};
use std::path::PathBuf;
use std::time::Duration;

/// Command line and environment configuration for the Blackjack server
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct ServerConfig {
    /// Server IP address to bind to
    #[arg(short = 'H', long, env = "BLACKJACK_HOST", default_value = DEFAULT_SERVER_HOST)]
    pub host: String,

    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = DEFAULT_SERVER_PORT)]
    pub port: u16,

    /// Path of the JSON leaderboard file
    #[arg(short, long, env = "RECORDS_FILE", default_value = "records.json")]
    pub records_file: PathBuf,

    /// Close connections idle for this long
    #[arg(long, default_value_t = CONNECTION_TIMEOUT_MS)]
    pub read_timeout_ms: u64,

    /// Pause between the final game state and the round result
    #[arg(long, default_value_t = 500)]
    pub result_pause_ms: u64,

    /// Number of records kept in the leaderboard file
    #[arg(long, default_value_t = MAX_RECORDS)]
    pub max_records: usize,

    /// Number of records returned per leaderboard request
    #[arg(long, default_value_t = TOP_RECORDS_DISPLAY)]
    pub top_records: usize,

    /// Seed shoe shuffles for reproducible games
    #[arg(long, env = "BLACKJACK_SEED")]
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            records_file: PathBuf::from("records.json"),
            read_timeout_ms: CONNECTION_TIMEOUT_MS,
            result_pause_ms: 500,
            max_records: MAX_RECORDS,
            top_records: TOP_RECORDS_DISPLAY,
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn handler_settings(&self) -> HandlerSettings {
        HandlerSettings {
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            result_pause: Duration::from_millis(self.result_pause_ms),
            top_records: self.top_records,
            seed: self.seed,
        }
    }
}

/// Startup hint printed when logging has not been configured
pub fn log_hint(rust_log: Option<&str>) -> Option<&'static str> {
    match rust_log {
        Some(filter) if !filter.trim().is_empty() => None,
        _ => Some("RUST_LOG is not set, only errors will be logged. Try RUST_LOG=info"),
    }
}

/// Per-connection settings resolved from [`ServerConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSettings {
    pub read_timeout: Duration,
    pub result_pause: Duration,
    pub top_records: usize,
    pub seed: Option<u64>,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        ServerConfig::default().handler_settings()
    }
}
