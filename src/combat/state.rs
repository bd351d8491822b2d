//! Combat state store
//!
//! The authoritative record of both players' HP, energy, stance, cooldowns,
//! pending attack and stats. Every mutation goes through a named method so
//! the bounds (0..=max HP, 0..=max energy) are enforced at each write site.

use serde::{Deserialize, Serialize};

use crate::combat::stance::Stance;
use crate::core::config::ArenaConfig;
use crate::core::types::{Millis, PlayerId};

/// Actions that are rate-limited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CooldownKey {
    Attack,
    Ultimate,
    Super,
    Counter,
}

impl CooldownKey {
    fn slot(self) -> usize {
        match self {
            CooldownKey::Attack => 0,
            CooldownKey::Ultimate => 1,
            CooldownKey::Super => 2,
            CooldownKey::Counter => 3,
        }
    }

    /// Minimum spacing between two successful triggers
    pub fn duration(self, config: &ArenaConfig) -> Millis {
        match self {
            CooldownKey::Attack => config.attack_cooldown_ms,
            CooldownKey::Ultimate => config.ultimate_cooldown_ms,
            CooldownKey::Super => config.super_cooldown_ms,
            CooldownKey::Counter => config.counter_cooldown_ms,
        }
    }
}

/// Last successful trigger per rate-limited action. `None` means never
/// triggered this match, which always passes the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    last: [Option<Millis>; 4],
}

impl Cooldowns {
    pub fn last_triggered(&self, key: CooldownKey) -> Option<Millis> {
        self.last[key.slot()]
    }

    /// Strictly more than `duration` ms since the last trigger
    pub fn ready(&self, key: CooldownKey, now: Millis, duration: Millis) -> bool {
        match self.last[key.slot()] {
            None => true,
            Some(last) => now.saturating_sub(last) > duration,
        }
    }

    pub fn stamp(&mut self, key: CooldownKey, now: Millis) {
        self.last[key.slot()] = Some(now);
    }

    /// Move every stamp forward by `delta` (time spent paused)
    pub fn shift(&mut self, delta: Millis) {
        for stamp in self.last.iter_mut().flatten() {
            *stamp += delta;
        }
    }
}

/// How a pending attack was produced. Decides the on-hit energy reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    Attack,
    Skill,
    Super,
    /// Inert placeholder for an explicitly cleared slot; never resolves
    Hidden,
}

/// An attack waiting out the defender's reaction window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingDamage {
    /// When the attack was triggered
    pub time: Millis,
    pub amount: f32,
    pub kind: PendingKind,
}

impl PendingDamage {
    pub fn hidden(time: Millis) -> Self {
        Self {
            time,
            amount: 0.0,
            kind: PendingKind::Hidden,
        }
    }

    /// Will this record ever resolve?
    pub fn is_armed(&self) -> bool {
        self.kind != PendingKind::Hidden && self.amount > 0.0
    }
}

/// Per-match counters feeding the final score. Never decrease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub total_damage_dealt: f32,
    pub attack_count: u32,
    pub defend_count: u32,
    pub super_used: u32,
    pub counter_success: u32,
}

/// One player's combat state for the current match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub hp: f32,
    /// Lagging HP shown by the health bar; always >= `hp`
    pub hp_display: f32,
    pub energy: f32,
    pub stance: Stance,
    pub cooldowns: Cooldowns,
    pub pending: Option<PendingDamage>,
    pub stats: CombatStats,
    max_hp: f32,
    max_energy: f32,
}

impl CombatState {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            hp: config.max_hp,
            hp_display: config.max_hp,
            energy: 0.0,
            stance: Stance::default(),
            cooldowns: Cooldowns::default(),
            pending: None,
            stats: CombatStats::default(),
            max_hp: config.max_hp,
            max_energy: config.max_energy,
        }
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0.0
    }

    /// Lose HP, floored at zero
    pub fn take_damage(&mut self, amount: f32) {
        self.hp = (self.hp - amount.max(0.0)).clamp(0.0, self.max_hp);
    }

    /// Add energy, capped at the maximum
    pub fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount.max(0.0)).clamp(0.0, self.max_energy);
    }

    /// Drain the whole energy bar (super cast)
    pub fn spend_all_energy(&mut self) {
        self.energy = 0.0;
    }

    /// Is the pending slot free for a new attack?
    pub fn can_arm(&self) -> bool {
        !matches!(self.pending, Some(p) if p.is_armed())
    }

    /// Place a new pending attack. A slot that still holds an armed record
    /// is left alone and the new attack is dropped.
    pub fn arm(&mut self, pending: PendingDamage) -> bool {
        if !self.can_arm() {
            return false;
        }
        self.pending = Some(pending);
        true
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Replace the pending slot with an inert record
    pub fn hide_pending(&mut self, now: Millis) {
        self.pending = Some(PendingDamage::hidden(now));
    }

    /// Push time-based state forward after a pause so windows and
    /// cooldowns resume where they stopped
    pub fn shift_timers(&mut self, delta: Millis) {
        self.cooldowns.shift(delta);
        if let Some(pending) = self.pending.as_mut() {
            pending.time += delta;
        }
    }

    /// Step the display bar toward real HP by at most `drain`
    pub fn converge_display(&mut self, drain: f32) {
        self.hp_display = if self.hp_display > self.hp {
            (self.hp_display - drain).max(self.hp)
        } else {
            self.hp
        };
    }
}

/// Both players' state, keyed by `PlayerId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStore {
    players: [CombatState; 2],
}

impl CombatStore {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            players: [CombatState::new(config), CombatState::new(config)],
        }
    }

    pub fn get(&self, player: PlayerId) -> &CombatState {
        &self.players[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut CombatState {
        &mut self.players[player.index()]
    }

    /// Mutable access to `player` and their opponent at once
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut CombatState, &mut CombatState) {
        let (first, second) = self.players.split_at_mut(1);
        match player {
            PlayerId::P1 => (&mut first[0], &mut second[0]),
            PlayerId::P2 => (&mut second[0], &mut first[0]),
        }
    }

    /// Clear every stance flag before the tick's input is applied
    pub fn clear_stances(&mut self) {
        for state in &mut self.players {
            state.stance.clear();
        }
    }

    pub fn shift_timers(&mut self, delta: Millis) {
        for state in &mut self.players {
            state.shift_timers(delta);
        }
    }

    pub fn converge_displays(&mut self, drain: f32) {
        for state in &mut self.players {
            state.converge_display(drain);
        }
    }

    /// Whole-state replacement for a new match
    pub fn reset(&mut self, config: &ArenaConfig) {
        *self = Self::new(config);
    }
}
