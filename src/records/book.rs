//! JSON-backed record book: leaderboard plus match history

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{ArenaError, Result};
use crate::records::history::{MatchHistory, MatchRecord, PlayerProfile};
use crate::records::leaderboard::Leaderboard;
use crate::records::ScoreSink;
use crate::session::outcome::MatchOutcome;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordBook {
    pub leaderboard: Leaderboard,
    pub history: MatchHistory,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl RecordBook {
    /// Records that live only in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load records from `path`; a missing file starts empty. Every
    /// recorded match is written back to the same file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut book = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str::<RecordBook>(&contents)?
        } else {
            RecordBook::default()
        };
        book.path = Some(path);
        Ok(book)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write to the backing file, if there is one
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| {
            ArenaError::Persistence(format!("failed to write {}: {}", path.display(), e))
        })
    }

    pub fn profile(&self, name: &str) -> PlayerProfile {
        self.history.profile(name)
    }
}

impl ScoreSink for RecordBook {
    fn record(&mut self, outcome: &MatchOutcome) -> Result<()> {
        let date = Utc::now();
        let [p1, p2] = &outcome.players;

        self.leaderboard.submit(&p1.name, p1.score, p1.rank, date);
        if p2.name != p1.name {
            self.leaderboard.submit(&p2.name, p2.score, p2.rank, date);
        }

        self.history.push(MatchRecord {
            id: Uuid::new_v4(),
            date,
            p1: p1.name.clone(),
            p1_score: p1.score,
            p2: p2.name.clone(),
            p2_score: p2.score,
            winner: outcome.verdict,
        });

        tracing::info!(
            "Recorded match {} ({}) vs {} ({})",
            p1.name,
            p1.score,
            p2.name,
            p2.score
        );
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::state::CombatStats;
    use crate::core::types::PlayerId;
    use crate::session::outcome::{EndReason, PlayerResult, Rank, Verdict};

    fn outcome(p1: &str, p1_score: u32, p2: &str, p2_score: u32, verdict: Verdict) -> MatchOutcome {
        let result = |player, name: &str, score| PlayerResult {
            player,
            name: name.to_string(),
            score,
            rank: Rank::from_score(score),
            final_hp: 50.0,
            stats: CombatStats::default(),
        };
        MatchOutcome {
            verdict,
            reason: EndReason::Timeout,
            ended_at: 60_000,
            players: [result(PlayerId::P1, p1, p1_score), result(PlayerId::P2, p2, p2_score)],
        }
    }

    #[test]
    fn test_record_updates_both_tables() {
        let mut book = RecordBook::in_memory();
        book.record(&outcome("ann", 900, "bo", 300, Verdict::P1)).unwrap();
        assert_eq!(book.leaderboard.len(), 2);
        assert_eq!(book.history.len(), 1);
        assert_eq!(book.profile("ann").wins, 1);
        assert_eq!(book.profile("bo").losses, 1);
    }

    #[test]
    fn test_same_name_submits_once() {
        let mut book = RecordBook::in_memory();
        book.record(&outcome("solo", 400, "solo", 900, Verdict::P2)).unwrap();
        assert_eq!(book.leaderboard.len(), 1);
        assert_eq!(book.leaderboard.best("solo").unwrap().score, 400);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let mut book = RecordBook::open(&path).unwrap();
        assert!(book.leaderboard.is_empty());
        book.record(&outcome("ann", 900, "bo", 300, Verdict::P1)).unwrap();

        let reopened = RecordBook::open(&path).unwrap();
        assert_eq!(reopened.leaderboard.entries(), book.leaderboard.entries());
        assert_eq!(reopened.history.records(), book.history.records());
        assert_eq!(reopened.path(), Some(path.as_path()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(RecordBook::open(&path), Err(ArenaError::SerdeError(_))));
    }
}
