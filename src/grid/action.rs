//! Combat actions bound to grid cells

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;

/// What a grid cell does when a player's hand enters it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Ultimate,
    Super,
    Charge,
    Defend,
    Counter,
}

impl ActionKind {
    /// Each player's fixed action pool, in placement order
    pub const POOL: [ActionKind; 6] = [
        ActionKind::Attack,
        ActionKind::Ultimate,
        ActionKind::Charge,
        ActionKind::Defend,
        ActionKind::Super,
        ActionKind::Counter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Ultimate => "ultimate",
            ActionKind::Super => "super",
            ActionKind::Charge => "charge",
            ActionKind::Defend => "defend",
            ActionKind::Counter => "counter",
        }
    }

    /// Overlay colour for this action in `owner`'s half
    pub fn display_color(&self, owner: PlayerId) -> Rgba {
        match (self, owner) {
            (ActionKind::Attack | ActionKind::Ultimate, PlayerId::P1) => Rgba::new(0, 0, 255, 0.4),
            (ActionKind::Attack | ActionKind::Ultimate, PlayerId::P2) => Rgba::new(255, 0, 0, 0.4),
            (ActionKind::Charge, _) => Rgba::new(128, 0, 128, 0.4),
            (ActionKind::Defend, _) => Rgba::new(0, 255, 0, 0.4),
            (ActionKind::Super, _) => Rgba::new(255, 0, 0, 0.6),
            (ActionKind::Counter, _) => Rgba::new(255, 215, 0, 0.4),
        }
    }
}

/// Display colour handed to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}
