//! Combat scenario tests
//!
//! Drive the resolver and arbiter directly, one simulated tick at a time,
//! and check the worked examples of delayed hits, blocks and counters.

use pose_arena::combat::{arbitrate, resolve, CombatStore, PendingKind, Resolution};
use pose_arena::core::config::ArenaConfig;
use pose_arena::core::types::{Millis, PlayerId};
use pose_arena::grid::ActionKind;
use pose_arena::session::{evaluate, EndReason, Rank, Verdict};

/// Minimal tick: reset stances, apply actions, arbitrate both players
fn tick(
    store: &mut CombatStore,
    config: &ArenaConfig,
    now: Millis,
    actions: &[(PlayerId, ActionKind)],
) -> Vec<Resolution> {
    store.clear_stances();
    for (player, action) in actions {
        resolve(store.get_mut(*player), config, *player, *action, now);
    }
    PlayerId::ALL
        .iter()
        .filter_map(|p| arbitrate(store, config, *p, now))
        .collect()
}

#[test]
fn test_unanswered_attack_lands_after_window() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);

    tick(&mut store, &config, 0, &[(PlayerId::P1, ActionKind::Attack)]);

    let mut landed = Vec::new();
    let mut now = 0;
    while now < 1100 {
        now += 16;
        landed.extend(tick(&mut store, &config, now, &[]));
    }

    assert_eq!(
        landed,
        vec![Resolution::Hit {
            attacker: PlayerId::P1,
            defender: PlayerId::P2,
            amount: 5.0,
            kind: PendingKind::Attack,
        }]
    );
    let p1 = store.get(PlayerId::P1);
    assert_eq!(store.get(PlayerId::P2).hp, 95.0);
    assert_eq!(p1.stats.total_damage_dealt, 5.0);
    assert_eq!(p1.stats.attack_count, 1);
    assert_eq!(p1.energy, 5.0);
}

#[test]
fn test_hit_lands_on_first_tick_at_window() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);

    tick(&mut store, &config, 0, &[(PlayerId::P1, ActionKind::Attack)]);
    assert!(tick(&mut store, &config, 999, &[]).is_empty());
    assert_eq!(tick(&mut store, &config, 1000, &[]).len(), 1);
}

#[test]
fn test_late_block_still_negates() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);

    tick(&mut store, &config, 0, &[(PlayerId::P1, ActionKind::Ultimate)]);
    tick(&mut store, &config, 500, &[]);
    let resolutions = tick(&mut store, &config, 990, &[(PlayerId::P2, ActionKind::Defend)]);

    assert_eq!(
        resolutions,
        vec![Resolution::Blocked {
            attacker: PlayerId::P1,
            defender: PlayerId::P2,
        }]
    );
    assert_eq!(store.get(PlayerId::P2).hp, 100.0);
    assert_eq!(store.get(PlayerId::P2).stats.defend_count, 1);
    assert_eq!(store.get(PlayerId::P1).energy, 0.0);
    assert!(store.get(PlayerId::P1).pending.is_none());
}

#[test]
fn test_super_countered_reflects_onto_attacker() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);
    store.get_mut(PlayerId::P1).gain_energy(100.0);

    tick(&mut store, &config, 0, &[(PlayerId::P1, ActionKind::Super)]);
    assert_eq!(store.get(PlayerId::P1).energy, 0.0);
    assert_eq!(store.get(PlayerId::P1).stats.super_used, 1);

    let resolutions = tick(
        &mut store,
        &config,
        300,
        &[
            (PlayerId::P2, ActionKind::Defend),
            (PlayerId::P2, ActionKind::Counter),
        ],
    );

    assert_eq!(
        resolutions,
        vec![Resolution::Countered {
            attacker: PlayerId::P1,
            defender: PlayerId::P2,
            amount: 20.0,
        }]
    );
    assert_eq!(store.get(PlayerId::P1).hp, 80.0);
    assert_eq!(store.get(PlayerId::P2).hp, 100.0);
    assert_eq!(store.get(PlayerId::P2).stats.counter_success, 1);
    assert_eq!(store.get(PlayerId::P1).stats.total_damage_dealt, 0.0);
}

#[test]
fn test_counter_without_defend_does_nothing() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);

    tick(&mut store, &config, 0, &[(PlayerId::P1, ActionKind::Attack)]);
    let resolutions = tick(&mut store, &config, 100, &[(PlayerId::P2, ActionKind::Counter)]);
    assert!(resolutions.is_empty());

    tick(&mut store, &config, 1016, &[]);
    assert_eq!(store.get(PlayerId::P2).hp, 95.0);
    assert_eq!(store.get(PlayerId::P2).stats.counter_success, 0);
}

#[test]
fn test_one_pending_attack_at_a_time() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);

    tick(&mut store, &config, 0, &[(PlayerId::P1, ActionKind::Attack)]);
    // Attack cooldown has passed but the first attack is still in flight
    tick(&mut store, &config, 600, &[(PlayerId::P1, ActionKind::Attack)]);
    tick(&mut store, &config, 700, &[(PlayerId::P1, ActionKind::Ultimate)]);

    let pending = store.get(PlayerId::P1).pending.unwrap();
    assert_eq!(pending.time, 0);
    assert_eq!(pending.kind, PendingKind::Attack);
    assert_eq!(store.get(PlayerId::P1).stats.attack_count, 1);
}

#[test]
fn test_charging_accumulates_energy() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);

    for i in 0..10 {
        tick(&mut store, &config, i * 16, &[(PlayerId::P1, ActionKind::Charge)]);
        assert!(store.get(PlayerId::P1).stance.charging);
    }
    assert!((store.get(PlayerId::P1).energy - 1.5).abs() < 1e-4);

    tick(&mut store, &config, 200, &[]);
    assert!(!store.get(PlayerId::P1).stance.charging);
}

#[test]
fn test_timeout_outcome_awards_bonus() {
    let config = ArenaConfig::default();
    let mut store = CombatStore::new(&config);
    store.get_mut(PlayerId::P1).take_damage(60.0);
    store.get_mut(PlayerId::P2).take_damage(30.0);

    let names = ["ann".to_string(), "bo".to_string()];
    let outcome = evaluate(&store, &config, &names, EndReason::Timeout, 60_000);

    assert_eq!(outcome.verdict, Verdict::P2);
    assert_eq!(outcome.result(PlayerId::P1).score, 200);
    assert_eq!(outcome.result(PlayerId::P1).rank, Rank::C);
    assert_eq!(outcome.result(PlayerId::P2).score, 350 + 500);
    assert_eq!(outcome.result(PlayerId::P2).rank, Rank::SS);
}

#[test]
fn test_draw_gets_no_bonus() {
    let config = ArenaConfig::default();
    let store = CombatStore::new(&config);
    let names = ["a".to_string(), "b".to_string()];
    let outcome = evaluate(&store, &config, &names, EndReason::Timeout, 60_000);

    assert_eq!(outcome.verdict, Verdict::Draw);
    assert_eq!(outcome.result(PlayerId::P1).score, 500);
    assert_eq!(outcome.result(PlayerId::P2).score, 500);
}
