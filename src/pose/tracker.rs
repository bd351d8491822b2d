//! Input conditioning: smoothing, player assignment, and the pose source seam
//!
//! Pose input is sampled once per tick. The newest sample always supersedes
//! the previous one; a missing or failed sample re-uses the last smoothed
//! frame so the combat core never sees a gap.

use crate::core::config::ArenaConfig;
use crate::core::error::Result;
use crate::pose::keypoint::{Keypoint, PoseFrame};

/// External pose estimator
pub trait PoseSource {
    /// Poses detected in the latest camera frame, in any order
    fn poll(&mut self) -> Result<Vec<PoseFrame>>;
}

/// Blend a new frame with the previous smoothed frame
///
/// Low-confidence points are replaced by the previous point (with the score
/// raised to `min_score`); everything else moves `factor` of the way from
/// the old position to the new one.
pub fn smooth(
    new: Option<&PoseFrame>,
    previous: Option<&PoseFrame>,
    min_score: f32,
    factor: f32,
) -> Option<PoseFrame> {
    let (new, previous) = match (new, previous) {
        (None, prev) => return prev.cloned(),
        (Some(new), None) => return Some(new.clone()),
        (Some(new), Some(prev)) => (new, prev),
    };

    let keypoints = new
        .keypoints
        .iter()
        .enumerate()
        .map(|(i, point)| match previous.keypoints.get(i) {
            Some(old) if point.score < min_score => Keypoint {
                score: min_score,
                ..*old
            },
            Some(old) => {
                let blended = old.position().lerp(&point.position(), factor);
                Keypoint {
                    x: blended.x,
                    y: blended.y,
                    score: point.score,
                }
            }
            None => *point,
        })
        .collect();

    Some(PoseFrame::new(keypoints))
}

/// Split detected poses into (P1, P2) by horizontal position on screen:
/// leftmost is P1. Extra detections are ignored.
pub fn assign_players(mut poses: Vec<PoseFrame>) -> (Option<PoseFrame>, Option<PoseFrame>) {
    poses.sort_by(|a, b| a.mean_x().total_cmp(&b.mean_x()));
    let mut iter = poses.into_iter();
    (iter.next(), iter.next())
}

/// Remembers one player's last smoothed frame
#[derive(Debug, Clone, Default)]
pub struct PoseTracker {
    previous: Option<PoseFrame>,
}

impl PoseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in this tick's sample (if any) and return the frame to act on
    pub fn sample(&mut self, config: &ArenaConfig, fresh: Option<&PoseFrame>) -> Option<&PoseFrame> {
        self.previous = smooth(
            fresh,
            self.previous.as_ref(),
            config.smoothing_min_score,
            config.smoothing_factor,
        );
        self.previous.as_ref()
    }

    pub fn last(&self) -> Option<&PoseFrame> {
        self.previous.as_ref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
