//! Per-tick stance flags
//!
//! A stance is not sticky: every flag is cleared at the start of a tick and
//! only holds if the player re-asserts it during that tick. The three flags
//! are independent; charging and defending may both be set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stance {
    /// Blocking incoming attacks
    pub defending: bool,
    /// Reflecting incoming attacks (only effective while also defending)
    pub countering: bool,
    /// Building energy
    pub charging: bool,
}

impl Stance {
    /// Drop every flag ahead of re-evaluation
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Would an incoming attack be reflected this tick?
    pub fn reflects(&self) -> bool {
        self.defending && self.countering
    }

    pub fn is_idle(&self) -> bool {
        !self.defending && !self.countering && !self.charging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(Stance::default().is_idle());
    }

    #[test]
    fn test_clear_drops_all_flags() {
        let mut stance = Stance {
            defending: true,
            countering: true,
            charging: true,
        };
        stance.clear();
        assert!(stance.is_idle());
    }

    #[test]
    fn test_counter_needs_defend() {
        let counter_only = Stance {
            countering: true,
            ..Stance::default()
        };
        assert!(!counter_only.reflects());

        let both = Stance {
            defending: true,
            countering: true,
            charging: false,
        };
        assert!(both.reflects());
    }
}
