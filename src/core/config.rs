//! Arena configuration with documented constants
//!
//! Every tunable of the combat core lives here. Values are fixed when the
//! process starts and handed to the match session, which owns its copy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ArenaError, Result};
use crate::core::types::Millis;

/// Configuration for the combat core
///
/// Missing fields in a TOML file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === PLAYFIELD ===
    /// Playfield width in pixels (matches the camera frame)
    pub playfield_width: f32,
    /// Playfield height in pixels
    pub playfield_height: f32,
    /// Number of grid rows laid over the playfield
    pub grid_rows: u32,
    /// Number of grid columns. Must be even: the left half belongs to P1,
    /// the right half to P2.
    pub grid_cols: u32,

    // === COOLDOWNS (ms) ===
    pub attack_cooldown_ms: Millis,
    pub ultimate_cooldown_ms: Millis,
    pub super_cooldown_ms: Millis,
    pub counter_cooldown_ms: Millis,

    /// Time a defender has to block or counter a pending attack
    pub reaction_window_ms: Millis,

    // === DAMAGE ===
    pub attack_damage: f32,
    pub ultimate_damage: f32,
    pub super_damage: f32,

    // === ENERGY ===
    /// Energy required (and spent in full) to cast a super
    pub super_energy_cost: f32,
    /// Energy granted to the attacker when an Attack lands
    pub energy_per_attack: f32,
    /// Energy granted to the attacker when a Skill lands
    pub energy_per_ultimate: f32,
    /// Energy gained per tick while a hand rests on the charge cell
    ///
    /// At 60 fps this fills an empty bar in roughly 11 seconds.
    pub charge_per_tick: f32,

    pub max_hp: f32,
    pub max_energy: f32,

    // === MATCH ===
    pub match_time_limit_ms: Millis,
    /// Added to the winner's score at match end
    pub win_bonus: u32,

    // === INPUT ===
    /// Wrist samples below this confidence never trigger a cell
    pub wrist_min_confidence: f32,
    /// Keypoints below this score are replaced with the previous frame's point
    pub smoothing_min_score: f32,
    /// Blend factor between previous and new keypoint positions
    pub smoothing_factor: f32,
    /// Mirror camera x coordinates before grid mapping (selfie view)
    pub mirror_input: bool,

    // === PRESENTATION ===
    /// HP the lagging display bar drains per tick
    pub hp_display_drain: f32,
    /// Minimum spacing between two charge notifications for one player
    pub charge_notify_interval_ms: Millis,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            playfield_width: 1280.0,
            playfield_height: 720.0,
            grid_rows: 4,
            grid_cols: 4,

            attack_cooldown_ms: 500,
            ultimate_cooldown_ms: 1000,
            super_cooldown_ms: 2000,
            counter_cooldown_ms: 1000,
            reaction_window_ms: 1000,

            attack_damage: 5.0,
            ultimate_damage: 10.0,
            super_damage: 20.0,

            super_energy_cost: 100.0,
            energy_per_attack: 5.0,
            energy_per_ultimate: 15.0,
            charge_per_tick: 0.15,

            max_hp: 100.0,
            max_energy: 100.0,

            match_time_limit_ms: 60_000,
            win_bonus: 500,

            wrist_min_confidence: 0.3,
            smoothing_min_score: 0.2,
            smoothing_factor: 0.5,
            mirror_input: true,

            hp_display_drain: 0.5,
            charge_notify_interval_ms: 1500,
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ArenaConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Width of one grid cell
    pub fn cell_width(&self) -> f32 {
        self.playfield_width / self.grid_cols as f32
    }

    /// Height of one grid cell
    pub fn cell_height(&self) -> f32 {
        self.playfield_height / self.grid_rows as f32
    }

    /// Total number of grid cells
    pub fn cell_count(&self) -> usize {
        (self.grid_rows * self.grid_cols) as usize
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return Err(ArenaError::InvalidConfig(format!(
                "playfield must have positive dimensions, got {}x{}",
                self.playfield_width, self.playfield_height
            )));
        }

        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(ArenaError::InvalidConfig(
                "grid must have at least one row and column".into(),
            ));
        }

        if self.grid_cols % 2 != 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "grid_cols ({}) must be even to split the grid into two home halves",
                self.grid_cols
            )));
        }

        let home_cells = self.cell_count() / 2;
        let pool = crate::grid::ActionKind::POOL.len();
        if home_cells < pool {
            return Err(ArenaError::InvalidConfig(format!(
                "each home half has {} cells but the action pool needs {}",
                home_cells, pool
            )));
        }

        if self.max_hp <= 0.0 || self.max_energy <= 0.0 {
            return Err(ArenaError::InvalidConfig(
                "max_hp and max_energy must be positive".into(),
            ));
        }

        if self.super_energy_cost > self.max_energy {
            return Err(ArenaError::InvalidConfig(format!(
                "super_energy_cost ({}) exceeds max_energy ({})",
                self.super_energy_cost, self.max_energy
            )));
        }

        if self.match_time_limit_ms == 0 || self.reaction_window_ms == 0 {
            return Err(ArenaError::InvalidConfig(
                "match_time_limit_ms and reaction_window_ms must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(ArenaError::InvalidConfig(format!(
                "smoothing_factor ({}) must be within 0.0..=1.0",
                self.smoothing_factor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cell_dimensions() {
        let config = ArenaConfig::default();
        assert_eq!(config.cell_width(), 320.0);
        assert_eq!(config.cell_height(), 180.0);
        assert_eq!(config.cell_count(), 16);
    }

    #[test]
    fn test_odd_columns_rejected() {
        let config = ArenaConfig {
            grid_cols: 3,
            ..ArenaConfig::default()
        };
        assert!(matches!(config.validate(), Err(ArenaError::InvalidConfig(_))));
    }

    #[test]
    fn test_tiny_grid_rejected() {
        // 2x2 leaves two cells per side, not enough for six actions
        let config = ArenaConfig {
            grid_rows: 2,
            grid_cols: 2,
            ..ArenaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ArenaConfig::from_toml_str(
            r#"
            match_time_limit_ms = 90000
            win_bonus = 250
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.match_time_limit_ms, 90_000);
        assert_eq!(config.win_bonus, 250);
        assert_eq!(config.attack_cooldown_ms, 500);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = ArenaConfig::from_toml_str(include_str!("../../data/arena.toml")).unwrap();
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = ArenaConfig::from_toml_str("grid_cols = 5");
        assert!(result.is_err());
    }
}
