//! Action resolver
//!
//! Turns a triggered grid action into a state mutation on the acting
//! player. Gates (cooldown, energy, free pending slot) only ever look at the
//! actor's own state, so the two players' calls within one tick commute.
//! A failed gate is a silent no-op.

use crate::combat::state::{CombatState, CooldownKey, PendingDamage, PendingKind};
use crate::core::config::ArenaConfig;
use crate::core::types::{Millis, PlayerId};
use crate::grid::ActionKind;

/// Apply `action` for `player` at time `now`
///
/// Returns whether the action took effect.
pub fn resolve(
    state: &mut CombatState,
    config: &ArenaConfig,
    player: PlayerId,
    action: ActionKind,
    now: Millis,
) -> bool {
    let applied = match action {
        ActionKind::Attack => strike(
            state,
            config,
            CooldownKey::Attack,
            PendingKind::Attack,
            config.attack_damage,
            now,
        ),
        ActionKind::Ultimate => strike(
            state,
            config,
            CooldownKey::Ultimate,
            PendingKind::Skill,
            config.ultimate_damage,
            now,
        ),
        ActionKind::Super => cast_super(state, config, now),
        ActionKind::Charge => {
            state.gain_energy(config.charge_per_tick);
            state.stance.charging = true;
            true
        }
        ActionKind::Defend => {
            state.stance.defending = true;
            true
        }
        ActionKind::Counter => {
            let key = CooldownKey::Counter;
            if state.cooldowns.ready(key, now, key.duration(config)) {
                state.stance.countering = true;
                state.cooldowns.stamp(key, now);
                true
            } else {
                false
            }
        }
    };

    if applied && matches!(action, ActionKind::Attack | ActionKind::Ultimate | ActionKind::Super) {
        tracing::debug!("{} triggered {} at {}ms", player, action.name(), now);
    }
    applied
}

/// Attack and Ultimate share the same shape: cooldown gate, free slot, arm
fn strike(
    state: &mut CombatState,
    config: &ArenaConfig,
    key: CooldownKey,
    kind: PendingKind,
    amount: f32,
    now: Millis,
) -> bool {
    if !state.cooldowns.ready(key, now, key.duration(config)) {
        return false;
    }
    if !state.arm(PendingDamage { time: now, amount, kind }) {
        return false;
    }
    state.cooldowns.stamp(key, now);
    state.stats.attack_count += 1;
    true
}

fn cast_super(state: &mut CombatState, config: &ArenaConfig, now: Millis) -> bool {
    let key = CooldownKey::Super;
    if state.energy < config.super_energy_cost {
        return false;
    }
    if !state.cooldowns.ready(key, now, key.duration(config)) {
        return false;
    }
    let pending = PendingDamage {
        time: now,
        amount: config.super_damage,
        kind: PendingKind::Super,
    };
    if !state.arm(pending) {
        return false;
    }
    state.cooldowns.stamp(key, now);
    state.stats.super_used += 1;
    state.spend_all_energy();
    true
}
