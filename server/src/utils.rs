use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Milliseconds since the Unix epoch, used for lastPlayed
pub fn get_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_millis() as u64
}

// Public player id for a connection
pub fn player_id(client_id: u32) -> String {
    format!("player-{}", client_id)
}
