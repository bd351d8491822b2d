//! Grid mapper: playfield zones to combat actions

pub mod action;
pub mod layout;
pub mod mapper;

pub use action::{ActionKind, Rgba};
pub use layout::{home_cells, CellBinding, GridLayout};
pub use mapper::{cell_at, locate};
