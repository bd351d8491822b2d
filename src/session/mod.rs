//! Match lifecycle: clock, outcome, events and the per-tick loop

pub mod clock;
pub mod events;
pub mod match_session;
pub mod outcome;

pub use clock::MatchClock;
pub use events::ArenaEvent;
pub use match_session::{GamePhase, MatchSession, TickInput};
pub use outcome::{evaluate, EndReason, MatchOutcome, PlayerResult, Rank, Verdict};
