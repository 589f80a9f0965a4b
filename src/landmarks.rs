// src/landmarks.rs - BlazePose landmark layout and accessors
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::PostureError;

/// Number of points in a BlazePose / MediaPipe Pose landmark set.
pub const LANDMARK_COUNT: usize = 33;

/// One tracked point as reported by the pose model (world-space meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Default for LandmarkPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Joint {
    pub const ALL: [Joint; LANDMARK_COUNT] = [
        Joint::Nose,
        Joint::LeftEyeInner,
        Joint::LeftEye,
        Joint::LeftEyeOuter,
        Joint::RightEyeInner,
        Joint::RightEye,
        Joint::RightEyeOuter,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::MouthLeft,
        Joint::MouthRight,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftPinky,
        Joint::RightPinky,
        Joint::LeftIndex,
        Joint::RightIndex,
        Joint::LeftThumb,
        Joint::RightThumb,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Joint> {
        Self::ALL.get(index).copied()
    }

    /// Canonical MediaPipe name, e.g. `LEFT_SHOULDER`.
    pub fn name(self) -> &'static str {
        match self {
            Joint::Nose => "NOSE",
            Joint::LeftEyeInner => "LEFT_EYE_INNER",
            Joint::LeftEye => "LEFT_EYE",
            Joint::LeftEyeOuter => "LEFT_EYE_OUTER",
            Joint::RightEyeInner => "RIGHT_EYE_INNER",
            Joint::RightEye => "RIGHT_EYE",
            Joint::RightEyeOuter => "RIGHT_EYE_OUTER",
            Joint::LeftEar => "LEFT_EAR",
            Joint::RightEar => "RIGHT_EAR",
            Joint::MouthLeft => "MOUTH_LEFT",
            Joint::MouthRight => "MOUTH_RIGHT",
            Joint::LeftShoulder => "LEFT_SHOULDER",
            Joint::RightShoulder => "RIGHT_SHOULDER",
            Joint::LeftElbow => "LEFT_ELBOW",
            Joint::RightElbow => "RIGHT_ELBOW",
            Joint::LeftWrist => "LEFT_WRIST",
            Joint::RightWrist => "RIGHT_WRIST",
            Joint::LeftPinky => "LEFT_PINKY",
            Joint::RightPinky => "RIGHT_PINKY",
            Joint::LeftIndex => "LEFT_INDEX",
            Joint::RightIndex => "RIGHT_INDEX",
            Joint::LeftThumb => "LEFT_THUMB",
            Joint::RightThumb => "RIGHT_THUMB",
            Joint::LeftHip => "LEFT_HIP",
            Joint::RightHip => "RIGHT_HIP",
            Joint::LeftKnee => "LEFT_KNEE",
            Joint::RightKnee => "RIGHT_KNEE",
            Joint::LeftAnkle => "LEFT_ANKLE",
            Joint::RightAnkle => "RIGHT_ANKLE",
            Joint::LeftHeel => "LEFT_HEEL",
            Joint::RightHeel => "RIGHT_HEEL",
            Joint::LeftFootIndex => "LEFT_FOOT_INDEX",
            Joint::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body side for bilateral checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn tag(self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }

    pub fn ear(self) -> Joint {
        match self {
            Side::Left => Joint::LeftEar,
            Side::Right => Joint::RightEar,
        }
    }

    pub fn shoulder(self) -> Joint {
        match self {
            Side::Left => Joint::LeftShoulder,
            Side::Right => Joint::RightShoulder,
        }
    }

    pub fn elbow(self) -> Joint {
        match self {
            Side::Left => Joint::LeftElbow,
            Side::Right => Joint::RightElbow,
        }
    }

    pub fn wrist(self) -> Joint {
        match self {
            Side::Left => Joint::LeftWrist,
            Side::Right => Joint::RightWrist,
        }
    }

    pub fn hip(self) -> Joint {
        match self {
            Side::Left => Joint::LeftHip,
            Side::Right => Joint::RightHip,
        }
    }

    pub fn knee(self) -> Joint {
        match self {
            Side::Left => Joint::LeftKnee,
            Side::Right => Joint::RightKnee,
        }
    }

    pub fn ankle(self) -> Joint {
        match self {
            Side::Left => Joint::LeftAnkle,
            Side::Right => Joint::RightAnkle,
        }
    }

    pub fn foot_index(self) -> Joint {
        match self {
            Side::Left => Joint::LeftFootIndex,
            Side::Right => Joint::RightFootIndex,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(format!("unknown side '{}', expected left or right", other)),
        }
    }
}

/// A complete 33-point pose. Point count and values are checked once, in
/// `from_points` and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LandmarkPoint>", into = "Vec<LandmarkPoint>")]
pub struct LandmarkSet {
    points: [LandmarkPoint; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [LandmarkPoint; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn from_points(points: Vec<LandmarkPoint>) -> Result<Self, PostureError> {
        let actual = points.len();
        let points: [LandmarkPoint; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| PostureError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual,
            })?;

        for (index, lm) in points.iter().enumerate() {
            if !(lm.x.is_finite() && lm.y.is_finite() && lm.z.is_finite()) {
                return Err(PostureError::InvalidLandmark {
                    index,
                    reason: format!("non-finite position ({}, {}, {})", lm.x, lm.y, lm.z),
                });
            }
            if !(0.0..=1.0).contains(&lm.visibility) {
                return Err(PostureError::InvalidLandmark {
                    index,
                    reason: format!("visibility {} outside [0, 1]", lm.visibility),
                });
            }
        }

        Ok(Self { points })
    }

    /// Position and visibility of a joint.
    pub fn get(&self, joint: Joint) -> (Vector3<f64>, f64) {
        let lm = &self.points[joint.index()];
        (lm.position(), lm.visibility)
    }

    pub fn position(&self, joint: Joint) -> Vector3<f64> {
        self.points[joint.index()].position()
    }

    pub fn visibility(&self, joint: Joint) -> f64 {
        self.points[joint.index()].visibility
    }

    /// Raw index access. Panics if `index >= LANDMARK_COUNT`.
    pub fn point(&self, index: usize) -> &LandmarkPoint {
        assert!(
            index < LANDMARK_COUNT,
            "landmark index {} out of range (0..{})",
            index,
            LANDMARK_COUNT
        );
        &self.points[index]
    }

    pub fn set(&mut self, joint: Joint, point: LandmarkPoint) {
        self.points[joint.index()] = point;
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self::new([LandmarkPoint::default(); LANDMARK_COUNT])
    }
}

impl TryFrom<Vec<LandmarkPoint>> for LandmarkSet {
    type Error = PostureError;

    fn try_from(points: Vec<LandmarkPoint>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<LandmarkSet> for Vec<LandmarkPoint> {
    fn from(set: LandmarkSet) -> Self {
        set.points.to_vec()
    }
}

/// Position and visibility of `joint` in `landmarks`.
pub fn get_point(landmarks: &LandmarkSet, joint: Joint) -> (Vector3<f64>, f64) {
    landmarks.get(joint)
}
