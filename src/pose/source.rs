//! Pose sources that need no camera: a seeded bot and a recorded script

use std::fs;
use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::ArenaConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{Millis, PlayerId, Vec2};
use crate::pose::keypoint::{Keypoint, PoseFrame};
use crate::pose::tracker::PoseSource;

/// One simulated fighter's current hand placement
#[derive(Debug, Clone)]
struct BotHands {
    left: Vec2,
    right: Vec2,
    hold: u32,
}

/// Two scripted fighters flailing at random cells in their own half
///
/// Emits camera-space detections, so they are mirrored back when the
/// session has `mirror_input` set.
pub struct BotSource {
    rng: ChaCha8Rng,
    width: f32,
    height: f32,
    mirror: bool,
    hands: [BotHands; 2],
}

impl BotSource {
    pub fn new(config: &ArenaConfig, seed: u64) -> Self {
        let rest = BotHands {
            left: Vec2::new(-1.0, -1.0),
            right: Vec2::new(-1.0, -1.0),
            hold: 0,
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            width: config.playfield_width,
            height: config.playfield_height,
            mirror: config.mirror_input,
            hands: [rest.clone(), rest],
        }
    }

    fn random_point(&mut self, player: PlayerId) -> Vec2 {
        let half = self.width / 2.0;
        let offset = match player {
            PlayerId::P1 => 0.0,
            PlayerId::P2 => half,
        };
        Vec2::new(
            offset + self.rng.gen_range(0.0..half),
            self.rng.gen_range(0.0..self.height),
        )
    }

    fn step(&mut self, player: PlayerId) {
        let i = player.index();
        if self.hands[i].hold > 0 {
            self.hands[i].hold -= 1;
            return;
        }

        // Occasionally drop both hands out of frame
        let (left, right) = if self.rng.gen_bool(0.15) {
            (Vec2::new(-1.0, -1.0), Vec2::new(-1.0, -1.0))
        } else {
            let left = self.random_point(player);
            let right = if self.rng.gen_bool(0.5) {
                left
            } else {
                self.random_point(player)
            };
            (left, right)
        };
        let hold = self.rng.gen_range(4..40);
        self.hands[i] = BotHands { left, right, hold };
    }

    fn frame(&self, player: PlayerId) -> PoseFrame {
        let hands = &self.hands[player.index()];
        let body_x = match player {
            PlayerId::P1 => self.width * 0.25,
            PlayerId::P2 => self.width * 0.75,
        };
        let frame = PoseFrame::with_wrists(
            Vec2::new(body_x, self.height * 0.5),
            Keypoint::new(hands.left.x, hands.left.y, 0.9),
            Keypoint::new(hands.right.x, hands.right.y, 0.9),
        );
        if self.mirror {
            frame.mirrored(self.width)
        } else {
            frame
        }
    }
}

impl PoseSource for BotSource {
    fn poll(&mut self) -> Result<Vec<PoseFrame>> {
        for player in PlayerId::ALL {
            self.step(player);
        }
        Ok(PlayerId::ALL.iter().map(|p| self.frame(*p)).collect())
    }
}

/// One line of a pose script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Match time the detections arrive at
    pub t: Millis,
    pub poses: Vec<PoseFrame>,
}

/// Replays detections from a JSON-lines script
///
/// Each poll returns the newest frame at or before the current time that
/// has not been returned yet, or nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    frames: Vec<ScriptFrame>,
    cursor: usize,
    now: Millis,
}

impl ScriptSource {
    pub fn new(mut frames: Vec<ScriptFrame>) -> Self {
        frames.sort_by_key(|f| f.t);
        Self {
            frames,
            cursor: 0,
            now: 0,
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut frames = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let frame: ScriptFrame = serde_json::from_str(line).map_err(|e| {
                ArenaError::PoseSource(format!("script line {}: {}", line_no + 1, e))
            })?;
            frames.push(frame);
        }
        Ok(Self::new(frames))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Set the match time used by the next poll
    pub fn advance_to(&mut self, now: Millis) {
        self.now = now;
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl PoseSource for ScriptSource {
    fn poll(&mut self) -> Result<Vec<PoseFrame>> {
        let mut latest = None;
        while let Some(frame) = self.frames.get(self.cursor) {
            if frame.t > self.now {
                break;
            }
            latest = Some(frame.poses.clone());
            self.cursor += 1;
        }
        Ok(latest.unwrap_or_default())
    }
}
