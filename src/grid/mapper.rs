//! Point-to-action lookup
//!
//! Pure function of (point, owner, layout). A hand crossing into the
//! opponent's half never triggers the opponent's actions.

use crate::core::config::ArenaConfig;
use crate::core::types::{PlayerId, Vec2};
use crate::grid::action::ActionKind;
use crate::grid::layout::GridLayout;

/// Cell number under `point`, or `None` outside the grid
pub fn cell_at(config: &ArenaConfig, point: Vec2) -> Option<usize> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }

    let col = (point.x / config.cell_width()).floor();
    let row = (point.y / config.cell_height()).floor();

    if col < 0.0 || row < 0.0 || col >= config.grid_cols as f32 || row >= config.grid_rows as f32 {
        return None;
    }

    Some(row as usize * config.grid_cols as usize + col as usize + 1)
}

/// Action `owner` triggers by placing a hand at `point`
pub fn locate(
    config: &ArenaConfig,
    layout: &GridLayout,
    point: Vec2,
    owner: PlayerId,
) -> Option<ActionKind> {
    let cell = cell_at(config, point)?;
    let binding = layout.binding(cell)?;
    (binding.owner == owner).then_some(binding.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_corners() {
        let config = ArenaConfig::default();
        assert_eq!(cell_at(&config, Vec2::new(0.0, 0.0)), Some(1));
        assert_eq!(cell_at(&config, Vec2::new(1279.9, 0.0)), Some(4));
        assert_eq!(cell_at(&config, Vec2::new(0.0, 719.9)), Some(13));
        assert_eq!(cell_at(&config, Vec2::new(1279.9, 719.9)), Some(16));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let config = ArenaConfig::default();
        assert_eq!(cell_at(&config, Vec2::new(-1.0, 10.0)), None);
        assert_eq!(cell_at(&config, Vec2::new(10.0, -0.5)), None);
        assert_eq!(cell_at(&config, Vec2::new(1280.0, 10.0)), None);
        assert_eq!(cell_at(&config, Vec2::new(10.0, 720.0)), None);
        assert_eq!(cell_at(&config, Vec2::new(f32::NAN, 10.0)), None);
    }

    #[test]
    fn test_locate_own_cell() {
        let config = ArenaConfig::default();
        let layout = GridLayout::ordered(&config);
        // Cell 1 is P1's first pool slot: attack
        let action = locate(&config, &layout, Vec2::new(100.0, 100.0), PlayerId::P1);
        assert_eq!(action, Some(ActionKind::Attack));
    }

    #[test]
    fn test_locate_opponent_cell_is_none() {
        let config = ArenaConfig::default();
        let layout = GridLayout::ordered(&config);
        // Cell 3 belongs to P2
        assert_eq!(locate(&config, &layout, Vec2::new(700.0, 100.0), PlayerId::P1), None);
        assert_eq!(
            locate(&config, &layout, Vec2::new(700.0, 100.0), PlayerId::P2),
            Some(ActionKind::Attack)
        );
    }

    #[test]
    fn test_locate_unbound_cell_is_none() {
        let config = ArenaConfig::default();
        let layout = GridLayout::ordered(&config);
        // Ordered P1 slots: 1,2,5,6,9,10 bound; 13,14 unbound
        assert_eq!(locate(&config, &layout, Vec2::new(100.0, 650.0), PlayerId::P1), None);
    }
}
