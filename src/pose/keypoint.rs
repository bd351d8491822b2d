//! Keypoints and pose frames as delivered by the pose estimator

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// COCO/MoveNet keypoint order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeypointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl KeypointName {
    pub const COUNT: usize = 17;

    /// Position in the estimator's output sequence
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One labelled 2D point with the estimator's confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// All keypoints for one detected person in one camera frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseFrame {
    pub keypoints: Vec<Keypoint>,
}

impl PoseFrame {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Frame with every keypoint parked at `rest`, then wrists placed
    pub fn with_wrists(rest: Vec2, left: Keypoint, right: Keypoint) -> Self {
        let mut keypoints = vec![Keypoint::new(rest.x, rest.y, 0.9); KeypointName::COUNT];
        keypoints[KeypointName::LeftWrist.index()] = left;
        keypoints[KeypointName::RightWrist.index()] = right;
        Self { keypoints }
    }

    pub fn get(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.get(name.index())
    }

    /// Both wrists, left first
    pub fn wrists(&self) -> [Option<&Keypoint>; 2] {
        [self.get(KeypointName::LeftWrist), self.get(KeypointName::RightWrist)]
    }

    /// Mean x over all keypoints; used to tell the two players apart
    pub fn mean_x(&self) -> f32 {
        if self.keypoints.is_empty() {
            return 0.0;
        }
        self.keypoints.iter().map(|k| k.x).sum::<f32>() / self.keypoints.len() as f32
    }

    /// Flip horizontally within a playfield of `width`
    pub fn mirrored(&self, width: f32) -> Self {
        Self {
            keypoints: self
                .keypoints
                .iter()
                .map(|k| Keypoint { x: width - k.x, ..*k })
                .collect(),
        }
    }
}
