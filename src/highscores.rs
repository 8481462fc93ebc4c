//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 scores. Every write replaces the
//! whole list.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::StorageError;
use crate::platform::storage::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Final score
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// ISO-8601 timestamp of the run
    pub date: String,
}

impl LeaderboardEntry {
    /// Calendar date part of the timestamp (`YYYY-MM-DD`)
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<LeaderboardEntry>,
}

impl HighScores {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "ghost-hunt-leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, restoring order and the size bound
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        // Stable: equal scores keep insertion order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Rank a score would achieve (1-indexed). Ties rank below existing
    /// entries with the same score.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let pos = self.entries.partition_point(|e| e.score >= score);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Add an entry, keeping the list sorted and bounded.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let pos = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Load the leaderboard. Absent, unreadable or corrupt data all read as
    /// an empty list.
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
                Ok(entries) => {
                    log::info!("Loaded {} high scores", entries.len());
                    return Self::from_entries(entries);
                }
                Err(e) => log::warn!("Ignoring corrupt leaderboard: {}", e),
            },
            Ok(None) => log::info!("No high scores found, starting fresh"),
            Err(e) => log::warn!("Leaderboard unavailable: {}", e),
        }
        Self::new()
    }

    /// Replace the persisted leaderboard with this one
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Result of recording a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    /// Leaderboard after the run was added
    pub leaderboard: HighScores,
    /// Rank achieved, if the run made the top 10
    pub rank: Option<usize>,
}

/// Record a finished run dated now
pub fn record_run<S: Storage + ?Sized>(
    storage: &mut S,
    score: u32,
    level: u32,
) -> Result<RecordedRun, StorageError> {
    record_run_at(storage, score, level, OffsetDateTime::now_utc())
}

/// Record a finished run: reload, insert, truncate to 10, write back whole
pub fn record_run_at<S: Storage + ?Sized>(
    storage: &mut S,
    score: u32,
    level: u32,
    date: OffsetDateTime,
) -> Result<RecordedRun, StorageError> {
    let entry = LeaderboardEntry {
        score,
        level,
        date: date.format(&Rfc3339)?,
    };

    let mut leaderboard = HighScores::load(storage);
    let rank = leaderboard.insert(entry);
    leaderboard.save(storage)?;

    Ok(RecordedRun { leaderboard, rank })
}
