//! Pending-damage arbiter
//!
//! Each player's pending slot is a small state machine:
//!
//! ```text
//! Idle --(resolver arms)--> Armed
//! Armed, elapsed < window, defender defending:
//!     defender countering -> reflect onto attacker -> Idle
//!     otherwise           -> blocked, no damage    -> Idle
//! Armed, elapsed >= window -> hit defender          -> Idle
//! ```
//!
//! The defence check runs on every tick while Armed, so a block landed late
//! in the window still negates the attack. A defender at 0 HP cannot block.

use serde::{Deserialize, Serialize};

use crate::combat::state::{CombatStore, PendingKind};
use crate::core::config::ArenaConfig;
use crate::core::types::{Millis, PlayerId};

/// How a pending attack ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// Defender blocked; nobody took damage
    Blocked { attacker: PlayerId, defender: PlayerId },
    /// Defender reflected the attack back onto the attacker
    Countered {
        attacker: PlayerId,
        defender: PlayerId,
        amount: f32,
    },
    /// Attack landed after the window expired
    Hit {
        attacker: PlayerId,
        defender: PlayerId,
        amount: f32,
        kind: PendingKind,
    },
    /// Window expired against a defender already at 0 HP
    Whiffed { attacker: PlayerId },
}

/// Advance `attacker`'s pending attack by one tick
///
/// Returns the resolution if the record left the Armed state this tick.
pub fn arbitrate(
    store: &mut CombatStore,
    config: &ArenaConfig,
    attacker: PlayerId,
    now: Millis,
) -> Option<Resolution> {
    let defender = attacker.opponent();
    let (atk, def) = store.pair_mut(attacker);

    let pending = atk.pending.filter(|p| p.is_armed())?;
    let elapsed = now.saturating_sub(pending.time);
    let in_window = elapsed < config.reaction_window_ms;

    if in_window && def.stance.defending && !def.is_down() {
        atk.clear_pending();
        if def.stance.countering {
            atk.take_damage(pending.amount);
            def.stats.counter_success += 1;
            tracing::debug!("{} countered {} for {}", defender, attacker, pending.amount);
            return Some(Resolution::Countered {
                attacker,
                defender,
                amount: pending.amount,
            });
        }
        def.stats.defend_count += 1;
        tracing::debug!("{} blocked {}'s {:?}", defender, attacker, pending.kind);
        return Some(Resolution::Blocked { attacker, defender });
    }

    if in_window {
        return None;
    }

    atk.clear_pending();
    if def.is_down() {
        return Some(Resolution::Whiffed { attacker });
    }

    def.take_damage(pending.amount);
    atk.stats.total_damage_dealt += pending.amount;
    match pending.kind {
        PendingKind::Attack => atk.gain_energy(config.energy_per_attack),
        PendingKind::Skill => atk.gain_energy(config.energy_per_ultimate),
        PendingKind::Super | PendingKind::Hidden => {}
    }
    tracing::debug!(
        "{} hit {} with {:?} for {} (hp now {})",
        attacker,
        defender,
        pending.kind,
        pending.amount,
        def.hp
    );

    Some(Resolution::Hit {
        attacker,
        defender,
        amount: pending.amount,
        kind: pending.kind,
    })
}
