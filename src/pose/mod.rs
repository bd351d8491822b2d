//! Pose input consumed by the combat core

pub mod keypoint;
pub mod source;
pub mod tracker;

pub use keypoint::{Keypoint, KeypointName, PoseFrame};
pub use source::{BotSource, ScriptFrame, ScriptSource};
pub use tracker::{assign_players, smooth, PoseSource, PoseTracker};
