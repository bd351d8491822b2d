//! Match outcome: scores, ranks and the winner
//!
//! Computed exactly once, on the tick the match clock latches over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::state::{CombatStats, CombatStore};
use crate::core::config::ArenaConfig;
use crate::core::types::{Millis, PlayerId};

/// Letter grade for a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    D,
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl Rank {
    /// Inclusive lower bounds, best first
    const THRESHOLDS: [(u32, Rank); 6] = [
        (1000, Rank::SSS),
        (800, Rank::SS),
        (650, Rank::S),
        (500, Rank::A),
        (350, Rank::B),
        (200, Rank::C),
    ];

    pub fn from_score(score: u32) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::D)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::SSS => "SSS",
            Rank::SS => "SS",
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
        }
    }

    /// Hex colour used to draw the grade
    pub fn color(&self) -> &'static str {
        match self {
            Rank::SSS => "#FF00FF",
            Rank::SS => "#FFD700",
            Rank::S => "#FFA500",
            Rank::A => "#00FF00",
            Rank::B => "#00FFFF",
            Rank::C => "#FFFFFF",
            Rank::D => "#808080",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    P1,
    P2,
    Draw,
}

impl Verdict {
    /// Strictly higher HP wins; equal HP is a draw
    pub fn from_hp(p1_hp: f32, p2_hp: f32) -> Self {
        if p1_hp > p2_hp {
            Verdict::P1
        } else if p2_hp > p1_hp {
            Verdict::P2
        } else {
            Verdict::Draw
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Verdict::P1 => Some(PlayerId::P1),
            Verdict::P2 => Some(PlayerId::P2),
            Verdict::Draw => None,
        }
    }
}

/// Why the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Knockout,
    Timeout,
}

/// Final line for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
    pub rank: Rank,
    pub final_hp: f32,
    pub stats: CombatStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub verdict: Verdict,
    pub reason: EndReason,
    pub ended_at: Millis,
    pub players: [PlayerResult; 2],
}

impl MatchOutcome {
    pub fn result(&self, player: PlayerId) -> &PlayerResult {
        &self.players[player.index()]
    }
}

/// Score before any win bonus
pub fn base_score(stats: &CombatStats, final_hp: f32) -> u32 {
    let score = stats.total_damage_dealt as f64 * 10.0
        + stats.attack_count as f64 * 5.0
        + stats.defend_count as f64 * 15.0
        + stats.super_used as f64 * 50.0
        + stats.counter_success as f64 * 30.0
        + final_hp as f64 * 5.0;
    score.max(0.0).floor() as u32
}

/// Build the terminal outcome from the final store
pub fn evaluate(
    store: &CombatStore,
    config: &ArenaConfig,
    names: &[String; 2],
    reason: EndReason,
    now: Millis,
) -> MatchOutcome {
    let verdict = Verdict::from_hp(store.get(PlayerId::P1).hp, store.get(PlayerId::P2).hp);

    let players = PlayerId::ALL.map(|player| {
        let state = store.get(player);
        let mut score = base_score(&state.stats, state.hp);
        if verdict.winner() == Some(player) {
            score += config.win_bonus;
        }
        PlayerResult {
            player,
            name: names[player.index()].clone(),
            score,
            rank: Rank::from_score(score),
            final_hp: state.hp,
            stats: state.stats,
        }
    });

    MatchOutcome {
        verdict,
        reason,
        ended_at: now,
        players,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_thresholds_inclusive() {
        assert_eq!(Rank::from_score(1000), Rank::SSS);
        assert_eq!(Rank::from_score(999), Rank::SS);
        assert_eq!(Rank::from_score(800), Rank::SS);
        assert_eq!(Rank::from_score(650), Rank::S);
        assert_eq!(Rank::from_score(500), Rank::A);
        assert_eq!(Rank::from_score(350), Rank::B);
        assert_eq!(Rank::from_score(200), Rank::C);
        assert_eq!(Rank::from_score(199), Rank::D);
        assert_eq!(Rank::from_score(0), Rank::D);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::SSS > Rank::SS);
        assert!(Rank::C > Rank::D);
    }

    #[test]
    fn test_base_score_formula() {
        let stats = CombatStats {
            total_damage_dealt: 30.0,
            attack_count: 4,
            defend_count: 2,
            super_used: 1,
            counter_success: 1,
        };
        // 300 + 20 + 30 + 50 + 30 + 350
        assert_eq!(base_score(&stats, 70.0), 780);
    }

    #[test]
    fn test_base_score_floors_fractional_hp() {
        let stats = CombatStats::default();
        assert_eq!(base_score(&stats, 10.5), 52);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(Verdict::from_hp(40.0, 70.0), Verdict::P2);
        assert_eq!(Verdict::from_hp(70.0, 40.0), Verdict::P1);
        assert_eq!(Verdict::from_hp(50.0, 50.0), Verdict::Draw);
        assert_eq!(Verdict::Draw.winner(), None);
    }

    #[test]
    fn test_evaluate_adds_win_bonus() {
        let config = ArenaConfig::default();
        let mut store = CombatStore::new(&config);
        store.get_mut(PlayerId::P1).take_damage(60.0);
        store.get_mut(PlayerId::P2).take_damage(30.0);
        let names = ["Ann".to_string(), "Bo".to_string()];

        let outcome = evaluate(&store, &config, &names, EndReason::Timeout, 60_000);
        assert_eq!(outcome.verdict, Verdict::P2);
        assert_eq!(outcome.result(PlayerId::P1).score, 200);
        assert_eq!(outcome.result(PlayerId::P1).rank, Rank::C);
        assert_eq!(outcome.result(PlayerId::P2).score, 350 + 500);
        assert_eq!(outcome.result(PlayerId::P2).rank, Rank::SS);
        assert_eq!(outcome.result(PlayerId::P2).name, "Bo");
    }

    #[test]
    fn test_draw_has_no_bonus() {
        let config = ArenaConfig::default();
        let store = CombatStore::new(&config);
        let names = ["A".to_string(), "B".to_string()];
        let outcome = evaluate(&store, &config, &names, EndReason::Timeout, 0);
        assert_eq!(outcome.verdict, Verdict::Draw);
        assert_eq!(outcome.result(PlayerId::P1).score, 500);
        assert_eq!(outcome.result(PlayerId::P2).score, 500);
    }
}
