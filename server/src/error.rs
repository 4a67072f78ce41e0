//! Server error types.

use shared::GamePhase;
use thiserror::Error;

/// Dealing from a shoe with no cards left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    #[error("no cards left in the shoe")]
    Empty,
}

/// Errors raised by the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The shoe ran dry mid-round; the round is aborted.
    #[error("the shoe ran out of cards, round aborted")]
    EmptyShoe,
    #[error("not your turn (phase {0})")]
    NotPlayerTurn(GamePhase),
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("no round has been started")]
    RoundNotStarted,
}

impl From<ShoeError> for SessionError {
    fn from(_: ShoeError) -> Self {
        SessionError::EmptyShoe
    }
}

/// Records file failures. Never fatal to the server.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("records file i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("records file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for listener operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Listener errors. Only a failed bind stops the process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    BindFailed {
        addr: String,
        source: std::io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
