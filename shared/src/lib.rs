//! Types shared by the Blackjack server and its clients: the card model,
//! hands with Blackjack valuation, and the wire protocol.

pub mod card;
pub mod hand;
pub mod protocol;

pub use card::{standard_deck, Card, Rank, Suit};
pub use hand::Hand;
pub use protocol::{ClientMessage, GameMode, GamePhase, GameResultType, Record, ServerMessage};

pub const BLACKJACK: u32 = 21;
pub const DEALER_STAND_THRESHOLD: u32 = 17;
pub const DECK_SIZE: usize = 52;
pub const DECK_RESET_THRESHOLD: usize = 15;

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 9999;
pub const CONNECTION_TIMEOUT_MS: u64 = 60_000;

/// Records kept in the persisted leaderboard
pub const MAX_RECORDS: usize = 100;
/// Records returned per leaderboard request
pub const TOP_RECORDS_DISPLAY: usize = 10;
