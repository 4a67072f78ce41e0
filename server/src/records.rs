//! Persistent leaderboard shared by every connection
//!
//! Records live in memory behind a reader-writer lock and are mirrored to a
//! JSON file. Reads share the lock; each result takes the write lock, updates
//! the counters and rewrites the whole file before releasing it.

use crate::error::RecordsError;
use crate::utils::get_timestamp;
use log::{error, info, warn};
use shared::{GameResultType, Record};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub struct RecordsStore {
    path: PathBuf,
    max_records: usize,
    records: RwLock<HashMap<String, Record>>,
}

impl RecordsStore {
    /// Loads the records file, starting empty when it is missing or unreadable
    pub async fn load(path: impl Into<PathBuf>, max_records: usize) -> Self {
        let path = path.into();

        let records = match read_records(&path).await {
            Ok(rows) => {
                info!("Loaded {} records from {}", rows.len(), path.display());
                rows.into_iter()
                    .map(|record| (record.name.clone(), record))
                    .collect()
            }
            Err(RecordsError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!("No records file at {}, a new one will be created", path.display());
                HashMap::new()
            }
            Err(e) => {
                warn!(
                    "Could not load records from {}: {}. Starting with an empty leaderboard",
                    path.display(),
                    e
                );
                HashMap::new()
            }
        };

        Self {
            path,
            max_records,
            records: RwLock::new(records),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies one round result to `name` and rewrites the records file
    ///
    /// A failed save is logged; the in-memory counters keep the update.
    pub async fn record_result(&self, name: &str, result: GameResultType) -> Record {
        let mut records = self.records.write().await;
        let now = get_timestamp();

        let record = records
            .entry(name.to_string())
            .or_insert_with(|| Record::new(name, now));

        match result {
            GameResultType::Win => record.wins += 1,
            GameResultType::Lose => record.losses += 1,
            GameResultType::Push => {}
            GameResultType::Blackjack => {
                record.wins += 1;
                record.blackjacks += 1;
            }
        }
        record.last_played = now;
        let updated = record.clone();

        match self.save(&records).await {
            Ok(saved) => info!("Records saved: {} players", saved),
            Err(e) => error!("Failed to save records to {}: {}", self.path.display(), e),
        }

        info!(
            "Record updated: {} ({}W-{}L, {} BJ)",
            updated.name, updated.wins, updated.losses, updated.blackjacks
        );
        updated
    }

    async fn save(&self, records: &HashMap<String, Record>) -> Result<usize, RecordsError> {
        let rows = ranked(records.values(), self.max_records);
        let json = serde_json::to_string_pretty(&rows)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(rows.len())
    }

    /// Best `limit` players: most wins first, then fewest losses
    pub async fn top_records(&self, limit: usize) -> Vec<Record> {
        let records = self.records.read().await;
        ranked(records.values(), limit)
    }

    pub async fn player_stats(&self, name: &str) -> Option<Record> {
        self.records.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

async fn read_records(path: &Path) -> Result<Vec<Record>, RecordsError> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}

fn ranked<'a>(records: impl Iterator<Item = &'a Record>, limit: usize) -> Vec<Record> {
    let mut rows: Vec<Record> = records.cloned().collect();
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then_with(|| a.name.cmp(&b.name))
    });
    rows.truncate(limit);
    rows
}
