//! Line-delimited JSON protocol spoken between clients and the server
//!
//! Every message is one JSON object on its own line. The `type` field
//! names the variant; fields the receiver does not know are ignored.

use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameMode {
    /// Player against the dealer
    Pve,
    /// Multiplayer table, acknowledged but not playable yet
    Pvp,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    Waiting,
    PlayerTurn,
    DealerTurn,
    GameOver,
}

/// Same spelling as on the wire
impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Waiting => "WAITING",
            GamePhase::PlayerTurn => "PLAYER_TURN",
            GamePhase::DealerTurn => "DEALER_TURN",
            GamePhase::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameResultType {
    Win,
    Lose,
    Push,
    Blackjack,
}

/// Leaderboard row for one player name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(alias = "playerName")]
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub blackjacks: u32,
    /// Milliseconds since the Unix epoch
    #[serde(alias = "timestamp")]
    pub last_played: u64,
}

impl Record {
    pub fn new(name: impl Into<String>, last_played: u64) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
            blackjacks: 0,
            last_played,
        }
    }

    /// Fraction of decided games won, pushes excluded
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            self.wins as f64 / decided as f64
        }
    }
}

/// Client to server messages
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    JoinGame {
        #[serde(alias = "playerName")]
        name: String,
        #[serde(alias = "gameMode")]
        mode: GameMode,
    },
    RequestCard,
    Stand,
    NewGame,
    RequestRecords,
    Ping,
}

/// Server to client messages
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    JoinConfirmation {
        id: String,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    GameState {
        player_hand: Vec<Card>,
        dealer_hand: Vec<Card>,
        player_score: u32,
        /// Only the dealer's up-card while the player is still acting
        dealer_score: u32,
        phase: GamePhase,
        can_hit: bool,
        can_stand: bool,
    },
    #[serde(rename_all = "camelCase")]
    GameResult {
        result: GameResultType,
        player_score: u32,
        dealer_score: u32,
        text: String,
        dealer_full_hand: Vec<Card>,
    },
    RecordsList {
        records: Vec<Record>,
    },
    Error {
        text: String,
    },
    Pong,
}

impl ServerMessage {
    pub fn error(text: impl Into<String>) -> Self {
        ServerMessage::Error { text: text.into() }
    }
}
