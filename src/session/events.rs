//! Discrete notifications for the audio and lighting collaborators

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::session::outcome::Verdict;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    MatchStarted,
    /// Attack or Skill landed
    Hit {
        attacker: PlayerId,
        target: PlayerId,
        amount: f32,
    },
    /// Super landed
    SuperHit {
        attacker: PlayerId,
        target: PlayerId,
        amount: f32,
    },
    Blocked {
        defender: PlayerId,
        attacker: PlayerId,
    },
    /// Attack reflected back onto the attacker
    Countered {
        defender: PlayerId,
        attacker: PlayerId,
        amount: f32,
    },
    /// Player is holding the charge cell (throttled)
    Charging { player: PlayerId },
    MatchOver { verdict: Verdict },
}

impl ArenaEvent {
    /// Sound key, if this event plays one. A counter reuses the hit sound.
    pub fn sound(&self) -> Option<&'static str> {
        match self {
            ArenaEvent::Hit { .. } | ArenaEvent::Countered { .. } => Some("hit"),
            ArenaEvent::SuperHit { .. } => Some("super"),
            ArenaEvent::Charging { .. } => Some("charge"),
            ArenaEvent::MatchOver { .. } => Some("win"),
            ArenaEvent::MatchStarted | ArenaEvent::Blocked { .. } => None,
        }
    }

    /// Lighting cue, if this event has one
    pub fn light_cue(&self) -> Option<String> {
        match self {
            ArenaEvent::Hit { target, .. } => Some(format!("hit_{}", target.tag())),
            ArenaEvent::SuperHit { .. } => Some("super".to_string()),
            ArenaEvent::Charging { player } => Some(format!("charge_{}", player.tag())),
            ArenaEvent::MatchOver { verdict } => Some(match verdict.winner() {
                Some(player) => format!("win_{}", player.tag()),
                None => "win".to_string(),
            }),
            ArenaEvent::MatchStarted | ArenaEvent::Blocked { .. } | ArenaEvent::Countered { .. } => {
                None
            }
        }
    }
}
