//! Per-match random assignment of actions to grid cells
//!
//! Cells are numbered 1..=rows*cols in row-major order. The left half of
//! the columns is P1's home, the right half P2's. Each player's six actions
//! are scattered over their own half once per match; the leftover cells in
//! each half stay unbound.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::ArenaConfig;
use crate::core::types::{PlayerId, Vec2};
use crate::grid::action::{ActionKind, Rgba};

/// What a single cell triggers, and for whom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBinding {
    pub owner: PlayerId,
    pub action: ActionKind,
    pub color: Rgba,
}

/// Immutable action layout for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    rows: u32,
    cols: u32,
    /// Index `n - 1` holds cell `n`
    cells: Vec<Option<CellBinding>>,
}

impl GridLayout {
    /// Layout with no bound cells
    pub fn empty(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; (rows * cols) as usize],
        }
    }

    /// Shuffle both players' pools into their home halves
    pub fn shuffled<R: Rng + ?Sized>(config: &ArenaConfig, rng: &mut R) -> Self {
        let mut layout = Self::empty(config.grid_rows, config.grid_cols);
        for owner in PlayerId::ALL {
            let mut slots = home_cells(owner, config.grid_rows, config.grid_cols);
            slots.shuffle(rng);
            for (action, cell) in ActionKind::POOL.iter().zip(slots) {
                layout.bind(cell, owner, *action);
            }
        }
        layout
    }

    /// Fixed layout: pool actions fill each home half in cell order.
    /// Handy for scripted input and tests.
    pub fn ordered(config: &ArenaConfig) -> Self {
        let mut layout = Self::empty(config.grid_rows, config.grid_cols);
        for owner in PlayerId::ALL {
            let slots = home_cells(owner, config.grid_rows, config.grid_cols);
            for (action, cell) in ActionKind::POOL.iter().zip(slots) {
                layout.bind(cell, owner, *action);
            }
        }
        layout
    }

    fn bind(&mut self, cell: usize, owner: PlayerId, action: ActionKind) {
        if let Some(slot) = cell.checked_sub(1).and_then(|i| self.cells.get_mut(i)) {
            *slot = Some(CellBinding {
                owner,
                action,
                color: action.display_color(owner),
            });
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Binding for a 1-based cell number
    pub fn binding(&self, cell: usize) -> Option<&CellBinding> {
        cell.checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .and_then(|slot| slot.as_ref())
    }

    /// Cell number where `owner`'s `action` lives
    pub fn cell_of(&self, owner: PlayerId, action: ActionKind) -> Option<usize> {
        self.cells.iter().position(|slot| {
            matches!(slot, Some(b) if b.owner == owner && b.action == action)
        })
        .map(|i| i + 1)
    }

    /// Iterate `(cell, binding)` over bound cells
    pub fn bindings(&self) -> impl Iterator<Item = (usize, &CellBinding)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|b| (i + 1, b)))
    }

    /// Centre point of a cell in playfield coordinates
    pub fn cell_center(&self, config: &ArenaConfig, cell: usize) -> Option<Vec2> {
        let index = cell.checked_sub(1)? as u32;
        if index >= self.rows * self.cols {
            return None;
        }
        let col = index % self.cols;
        let row = index / self.cols;
        Some(Vec2::new(
            (col as f32 + 0.5) * config.cell_width(),
            (row as f32 + 0.5) * config.cell_height(),
        ))
    }
}

/// 1-based cell numbers making up `owner`'s home half
pub fn home_cells(owner: PlayerId, rows: u32, cols: u32) -> Vec<usize> {
    let half = cols / 2;
    let col_range = match owner {
        PlayerId::P1 => 0..half,
        PlayerId::P2 => half..cols,
    };
    let mut cells = Vec::with_capacity((rows * half) as usize);
    for row in 0..rows {
        for col in col_range.clone() {
            cells.push((row * cols + col + 1) as usize);
        }
    }
    cells
}
