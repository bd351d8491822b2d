//! Match session - orchestrates one tick of the combat core
//!
//! Per tick:
//! pose sample -> stance reset -> grid mapper -> action resolver ->
//! pending-damage arbiter -> HP display -> match clock -> outcome (once)
//!
//! Everything runs synchronously on the caller's thread, except score
//! persistence, which is queued to a `ScoreWriter` thread. The session owns
//! the only mutable copy of the combat state; restarting or quitting
//! replaces it wholesale.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{arbitrate, resolve, CombatStore, PendingKind, Resolution};
use crate::core::config::ArenaConfig;
use crate::core::error::Result;
use crate::core::types::{Millis, PlayerId};
use crate::grid::{locate, GridLayout};
use crate::pose::{assign_players, PoseFrame, PoseSource, PoseTracker};
use crate::records::{ScoreSink, ScoreWriter};
use crate::session::clock::MatchClock;
use crate::session::events::ArenaEvent;
use crate::session::outcome::{evaluate, EndReason, MatchOutcome};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for a match to start
    Start,
    Playing,
    Paused,
    GameOver,
}

/// This tick's pose sample, already in screen space and split by player
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub p1: Option<PoseFrame>,
    pub p2: Option<PoseFrame>,
}

impl TickInput {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw camera detections: mirror if configured, then
    /// assign players left to right
    pub fn from_detections(config: &ArenaConfig, detections: Vec<PoseFrame>) -> Self {
        let detections = if config.mirror_input {
            detections
                .iter()
                .map(|pose| pose.mirrored(config.playfield_width))
                .collect()
        } else {
            detections
        };
        let (p1, p2) = assign_players(detections);
        Self { p1, p2 }
    }

    pub fn get(&self, player: PlayerId) -> Option<&PoseFrame> {
        match player {
            PlayerId::P1 => self.p1.as_ref(),
            PlayerId::P2 => self.p2.as_ref(),
        }
    }
}

pub struct MatchSession {
    config: ArenaConfig,
    rng: ChaCha8Rng,
    phase: GamePhase,
    names: [String; 2],
    store: CombatStore,
    layout: GridLayout,
    clock: MatchClock,
    trackers: [PoseTracker; 2],
    last_charge_notice: [Option<Millis>; 2],
    outcome: Option<MatchOutcome>,
    writer: Option<ScoreWriter>,
}

impl MatchSession {
    /// Create a session. The seed drives every grid shuffle.
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let store = CombatStore::new(&config);
        let layout = GridLayout::empty(config.grid_rows, config.grid_cols);
        let clock = MatchClock::start(0, config.match_time_limit_ms);
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: GamePhase::Start,
            names: ["Player 1".to_string(), "Player 2".to_string()],
            store,
            layout,
            clock,
            trackers: [PoseTracker::new(), PoseTracker::new()],
            last_charge_notice: [None; 2],
            outcome: None,
            writer: None,
        })
    }

    /// Hand finished matches to `sink`, which runs on a background writer
    /// thread so a slow write never stalls a tick
    pub fn with_sink(mut self, sink: Box<dyn ScoreSink>) -> Result<Self> {
        self.close_sink();
        self.writer = Some(ScoreWriter::spawn(sink)?);
        Ok(self)
    }

    /// Flush outstanding outcomes and detach the sink. Blocks until the
    /// writer is done, so call it outside the tick loop.
    pub fn close_sink(&mut self) {
        if let Some(writer) = self.writer.take() {
            writer.close();
        }
    }

    pub fn set_player_names(&mut self, p1: impl Into<String>, p2: impl Into<String>) {
        self.names = [p1.into(), p2.into()];
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn store(&self) -> &CombatStore {
        &self.store
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.names[player.index()]
    }

    /// Begin a fresh match with a newly shuffled grid
    pub fn start_match(&mut self, now: Millis) -> Vec<ArenaEvent> {
        let layout = GridLayout::shuffled(&self.config, &mut self.rng);
        self.start_with_layout(now, layout)
    }

    /// Begin a fresh match on a caller-supplied layout
    pub fn start_with_layout(&mut self, now: Millis, layout: GridLayout) -> Vec<ArenaEvent> {
        self.reset_state();
        self.layout = layout;
        self.clock = MatchClock::start(now, self.config.match_time_limit_ms);
        self.phase = GamePhase::Playing;

        tracing::info!(
            "Match started: {} vs {} ({} bound cells)",
            self.names[0],
            self.names[1],
            self.layout.bindings().count()
        );
        vec![ArenaEvent::MatchStarted]
    }

    pub fn pause(&mut self, now: Millis) {
        if self.phase == GamePhase::Playing {
            self.clock.pause(now);
            self.phase = GamePhase::Paused;
            tracing::info!("Match paused at {}ms", now);
        }
    }

    pub fn resume(&mut self, now: Millis) {
        if self.phase == GamePhase::Paused {
            let paused = self.clock.resume(now);
            self.store.shift_timers(paused);
            self.phase = GamePhase::Playing;
            tracing::info!("Match resumed after {}ms", paused);
        }
    }

    /// Abandon whatever is running and return to the start screen
    pub fn quit(&mut self) {
        self.reset_state();
        self.clock = MatchClock::start(0, self.config.match_time_limit_ms);
        self.phase = GamePhase::Start;
    }

    fn reset_state(&mut self) {
        self.store.reset(&self.config);
        for tracker in &mut self.trackers {
            tracker.reset();
        }
        self.last_charge_notice = [None; 2];
        self.outcome = None;
    }

    /// Tick using the external pose source. A failing source is logged and
    /// the tick runs on the previous frame's poses.
    pub fn tick_from_source(&mut self, now: Millis, source: &mut dyn PoseSource) -> Vec<ArenaEvent> {
        let input = match source.poll() {
            Ok(detections) => TickInput::from_detections(&self.config, detections),
            Err(e) => {
                tracing::warn!("Pose source failed, reusing previous frame: {}", e);
                TickInput::empty()
            }
        };
        self.tick(now, &input)
    }

    /// Advance the match by one frame
    pub fn tick(&mut self, now: Millis, input: &TickInput) -> Vec<ArenaEvent> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::GameOver => {
                self.store.converge_displays(self.config.hp_display_drain);
                return Vec::new();
            }
            GamePhase::Start | GamePhase::Paused => return Vec::new(),
        }

        let mut events = Vec::new();

        self.store.clear_stances();
        self.apply_input(now, input);
        self.notify_charging(now, &mut events);

        for attacker in PlayerId::ALL {
            if let Some(resolution) = arbitrate(&mut self.store, &self.config, attacker, now) {
                events.extend(resolution_event(resolution));
            }
        }

        self.store.converge_displays(self.config.hp_display_drain);

        self.clock.update(now);
        let knockout = PlayerId::ALL.iter().any(|p| self.store.get(*p).is_down());
        if (knockout || self.clock.timed_out()) && self.clock.latch_over() {
            let reason = if knockout {
                EndReason::Knockout
            } else {
                EndReason::Timeout
            };
            events.push(self.finish(now, reason));
        }

        events
    }

    /// Run every confident wrist through the grid and resolver
    fn apply_input(&mut self, now: Millis, input: &TickInput) {
        for player in PlayerId::ALL {
            let Some(frame) = self.trackers[player.index()].sample(&self.config, input.get(player))
            else {
                continue;
            };

            for wrist in frame.wrists().into_iter().flatten() {
                if wrist.score < self.config.wrist_min_confidence {
                    continue;
                }
                if let Some(action) = locate(&self.config, &self.layout, wrist.position(), player) {
                    resolve(self.store.get_mut(player), &self.config, player, action, now);
                }
            }
        }
    }

    fn notify_charging(&mut self, now: Millis, events: &mut Vec<ArenaEvent>) {
        for player in PlayerId::ALL {
            if !self.store.get(player).stance.charging {
                continue;
            }
            let last = &mut self.last_charge_notice[player.index()];
            let due = match *last {
                None => true,
                Some(at) => now.saturating_sub(at) > self.config.charge_notify_interval_ms,
            };
            if due {
                *last = Some(now);
                events.push(ArenaEvent::Charging { player });
            }
        }
    }

    /// Compute the outcome and hand it off. Runs once per match.
    fn finish(&mut self, now: Millis, reason: EndReason) -> ArenaEvent {
        let outcome = evaluate(&self.store, &self.config, &self.names, reason, now);
        tracing::info!(
            "Match over ({:?}): {:?} - {} {} [{}] / {} {} [{}]",
            reason,
            outcome.verdict,
            outcome.players[0].name,
            outcome.players[0].score,
            outcome.players[0].rank,
            outcome.players[1].name,
            outcome.players[1].score,
            outcome.players[1].rank
        );

        if self.clock.mark_saved() {
            if let Some(writer) = &self.writer {
                writer.submit(outcome.clone());
            }
        }

        let event = ArenaEvent::MatchOver {
            verdict: outcome.verdict,
        };
        self.outcome = Some(outcome);
        self.phase = GamePhase::GameOver;
        event
    }
}

fn resolution_event(resolution: Resolution) -> Option<ArenaEvent> {
    match resolution {
        Resolution::Hit {
            attacker,
            defender,
            amount,
            kind: PendingKind::Super,
        } => Some(ArenaEvent::SuperHit {
            attacker,
            target: defender,
            amount,
        }),
        Resolution::Hit {
            attacker,
            defender,
            amount,
            ..
        } => Some(ArenaEvent::Hit {
            attacker,
            target: defender,
            amount,
        }),
        Resolution::Blocked { attacker, defender } => {
            Some(ArenaEvent::Blocked { defender, attacker })
        }
        Resolution::Countered {
            attacker,
            defender,
            amount,
        } => Some(ArenaEvent::Countered {
            defender,
            attacker,
            amount,
        }),
        Resolution::Whiffed { .. } => None,
    }
}
