//! Pose Arena - two-player motion-controlled fighting game core
//!
//! Camera poses are mapped onto a shuffled grid of action cells; the combat
//! core resolves actions, delayed hits and counters, then scores the match.

pub mod combat;
pub mod core;
pub mod grid;
pub mod pose;
pub mod records;
pub mod session;
