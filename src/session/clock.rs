//! Match clock
//!
//! Timeouts are cooperative: the session polls `update` once per tick.
//! `is_over` and `score_saved` are one-way latches for the current match.

use serde::{Deserialize, Serialize};

use crate::core::types::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClock {
    pub start_time: Millis,
    pub time_limit_ms: Millis,
    pub remaining_seconds: u64,
    is_over: bool,
    score_saved: bool,
    paused_at: Option<Millis>,
}

impl MatchClock {
    pub fn start(now: Millis, time_limit_ms: Millis) -> Self {
        Self {
            start_time: now,
            time_limit_ms,
            remaining_seconds: remaining_seconds(time_limit_ms, 0),
            is_over: false,
            score_saved: false,
            paused_at: None,
        }
    }

    /// Recompute remaining whole seconds (rounded up) at `now`
    pub fn update(&mut self, now: Millis) -> u64 {
        let elapsed = now.saturating_sub(self.start_time);
        self.remaining_seconds = remaining_seconds(self.time_limit_ms, elapsed);
        self.remaining_seconds
    }

    pub fn timed_out(&self) -> bool {
        self.remaining_seconds == 0
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Latch the match as over. Returns true only on the first call.
    pub fn latch_over(&mut self) -> bool {
        if self.is_over {
            return false;
        }
        self.is_over = true;
        true
    }

    pub fn score_saved(&self) -> bool {
        self.score_saved
    }

    /// Latch that the terminal score was handed off. Returns true only on
    /// the first call.
    pub fn mark_saved(&mut self) -> bool {
        if self.score_saved {
            return false;
        }
        self.score_saved = true;
        true
    }

    pub fn pause(&mut self, now: Millis) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Resume and push the start time back by the paused duration.
    /// Returns that duration.
    pub fn resume(&mut self, now: Millis) -> Millis {
        match self.paused_at.take() {
            Some(at) => {
                let paused = now.saturating_sub(at);
                self.start_time += paused;
                paused
            }
            None => 0,
        }
    }
}

/// `max(0, ceil((limit - elapsed) / 1000))`
pub fn remaining_seconds(time_limit_ms: Millis, elapsed: Millis) -> u64 {
    time_limit_ms.saturating_sub(elapsed).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_rounds_up() {
        assert_eq!(remaining_seconds(60_000, 0), 60);
        assert_eq!(remaining_seconds(60_000, 1), 60);
        assert_eq!(remaining_seconds(60_000, 999), 60);
        assert_eq!(remaining_seconds(60_000, 1000), 59);
        assert_eq!(remaining_seconds(60_000, 59_001), 1);
        assert_eq!(remaining_seconds(60_000, 60_000), 0);
        assert_eq!(remaining_seconds(60_000, 90_000), 0);
    }

    #[test]
    fn test_update_tracks_elapsed() {
        let mut clock = MatchClock::start(5000, 60_000);
        assert_eq!(clock.remaining_seconds, 60);
        assert_eq!(clock.update(35_000), 30);
        assert!(!clock.timed_out());
        clock.update(65_000);
        assert!(clock.timed_out());
    }

    #[test]
    fn test_latches_fire_once() {
        let mut clock = MatchClock::start(0, 60_000);
        assert!(clock.latch_over());
        assert!(!clock.latch_over());
        assert!(clock.is_over());

        assert!(clock.mark_saved());
        assert!(!clock.mark_saved());
        assert!(clock.score_saved());
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut clock = MatchClock::start(0, 60_000);
        clock.update(10_000);
        clock.pause(10_000);
        assert_eq!(clock.resume(40_000), 30_000);
        assert_eq!(clock.update(40_000), 50);
    }
}
