//! Persistence collaborators for finished matches

pub mod book;
pub mod history;
pub mod leaderboard;
pub mod writer;

pub use book::RecordBook;
pub use history::{MatchHistory, MatchRecord, PlayerProfile};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use writer::ScoreWriter;

use crate::core::error::Result;
use crate::session::outcome::MatchOutcome;

/// Receives each match's terminal outcome exactly once
///
/// Runs on the `ScoreWriter` thread, never inside a tick. Failures are
/// logged there and never affect the match.
pub trait ScoreSink: Send {
    fn record(&mut self, outcome: &MatchOutcome) -> Result<()>;
}
