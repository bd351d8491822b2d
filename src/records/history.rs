//! Match history and per-player profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::outcome::Verdict;

/// Records kept, newest first
pub const HISTORY_CAPACITY: usize = 500;

/// Matches shown in a profile
pub const RECENT_MATCHES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub p1: String,
    pub p1_score: u32,
    pub p2: String,
    pub p2_score: u32,
    pub winner: Verdict,
}

impl MatchRecord {
    pub fn involves(&self, name: &str) -> bool {
        self.p1 == name || self.p2 == name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

/// Aggregate view of one player's matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Whole percent, rounded down
    pub win_rate: u32,
    /// Rounded down
    pub avg_score: u32,
    pub recent_matches: Vec<MatchRecord>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MatchRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAPACITY);
    }

    /// Records, newest first
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn profile(&self, name: &str) -> PlayerProfile {
        let mine: Vec<&MatchRecord> = self.records.iter().filter(|r| r.involves(name)).collect();

        let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);
        let mut total_score: u64 = 0;

        for record in &mine {
            // A self-match counts from the P1 side, same as the leaderboard
            let (score, won, lost) = if record.p1 == name {
                (record.p1_score, Verdict::P1, Verdict::P2)
            } else {
                (record.p2_score, Verdict::P2, Verdict::P1)
            };
            total_score += score as u64;
            if record.winner == won {
                wins += 1;
            } else if record.winner == lost {
                losses += 1;
            } else {
                draws += 1;
            }
        }

        let total_games = mine.len() as u32;
        let (win_rate, avg_score) = if total_games > 0 {
            (wins * 100 / total_games, (total_score / total_games as u64) as u32)
        } else {
            (0, 0)
        };

        PlayerProfile {
            name: name.to_string(),
            total_games,
            wins,
            losses,
            draws,
            win_rate,
            avg_score,
            recent_matches: mine.into_iter().take(RECENT_MATCHES).cloned().collect(),
        }
    }
}
