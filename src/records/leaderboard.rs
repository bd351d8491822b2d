//! Best-score leaderboard, one entry per player name

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::outcome::Rank;

/// Entries kept after each submission
pub const LEADERBOARD_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub rank: Rank,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score. A player's existing entry is only replaced by a
    /// strictly higher score.
    pub fn submit(&mut self, name: &str, score: u32, rank: Rank, date: DateTime<Utc>) {
        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
            rank,
            date,
        };

        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) if score > existing.score => *existing = entry,
            Some(_) => {}
            None => self.entries.push(entry),
        }

        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);
    }

    /// Entries, best first
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn best(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
