//! # Blackjack Server Library
//!
//! Authoritative server for a line-delimited JSON Blackjack protocol over TCP.
//! Every connection gets its own handler task and its own game session; the
//! only state shared between connections is the leaderboard.
//!
//! ## Module Organization
//!
//! ### Game Logic (`shoe`, `rules`, `session`)
//! - Shoe of 52 cards with shuffling and automatic reset when it runs low
//! - Dealer policy and the win/lose/push/blackjack decision table
//! - Per-connection round state machine: deal, hit, stand, dealer turn
//!
//! ### Connections (`network`, `client`)
//! - TCP accept loop that spawns one task per client
//! - Message dispatch, idle timeout and result reporting for one client
//!
//! ### Persistence (`records`)
//! Leaderboard shared by every handler, guarded by a reader-writer lock and
//! mirrored to a JSON file after every finished round.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//! use server::records::RecordsStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let records = Arc::new(RecordsStore::load(&config.records_file, config.max_records).await);
//!
//!     let server = Server::bind(&config, records).await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod records;
pub mod rules;
pub mod session;
pub mod shoe;
pub mod utils;
