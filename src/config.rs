// src/config.rs - Per-mode thresholds (degrees unless noted)
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PostureError, Result};
use crate::geometry::Axis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatThresholds {
    pub back_angle: f64,       // shoulder-hip-knee minimum
    pub knee_toe_margin: f64,  // meters the knee may travel past the toe
    /// Axis the knee and toe are compared along. Defaults to x, the horizontal
    /// direction of forward travel; use `y` for a vertical-axis convention.
    pub forward_axis: Axis,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            back_angle: 150.0,
            knee_toe_margin: 0.0,
            forward_axis: Axis::X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskThresholds {
    pub neck_angle: f64,  // ear-shoulder-hip minimum
    pub back_angle: f64,  // shoulder-hip-knee minimum
}

impl Default for DeskThresholds {
    fn default() -> Self {
        Self {
            neck_angle: 150.0,
            back_angle: 160.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupThresholds {
    /// Allowed shoulder-elbow-wrist angle at the bottom, inclusive.
    pub elbow_range: [f64; 2],
    /// Minimum shoulder-hip-ankle angle.
    pub back_angle: f64,
}

impl Default for PushupThresholds {
    fn default() -> Self {
        Self {
            elbow_range: [80.0, 100.0],
            back_angle: 165.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LungeThresholds {
    pub torso_angle: f64,
    pub back_leg_angle: f64,
    pub knee_ankle_margin: f64,  // meters
    /// Axis the knee and ankle are compared along. Defaults to x (horizontal);
    /// `y` gives the vertical-axis reading, `z` compares depth.
    pub forward_axis: Axis,
}

impl Default for LungeThresholds {
    fn default() -> Self {
        Self {
            torso_angle: 160.0,
            back_leg_angle: 140.0,
            knee_ankle_margin: 0.05,
            forward_axis: Axis::X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YogaThresholds {
    pub arm_angle: f64,
    pub shoulder_hip_margin: f64,  // meters, vertical
    pub symmetry: f64,             // max left/right arm angle difference
}

impl Default for YogaThresholds {
    fn default() -> Self {
        Self {
            arm_angle: 170.0,
            shoulder_hip_margin: 0.05,
            symmetry: 10.0,
        }
    }
}

/// Thresholds for every mode. Passed into each evaluation; never global.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub squat: SquatThresholds,
    pub desk: DeskThresholds,
    pub pushup: PushupThresholds,
    pub lunge: LungeThresholds,
    pub yoga: YogaThresholds,
}

impl ThresholdConfig {
    /// Parse overrides; fields left out keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let angles = [
            ("squat.back_angle", self.squat.back_angle),
            ("desk.neck_angle", self.desk.neck_angle),
            ("desk.back_angle", self.desk.back_angle),
            ("pushup.elbow_range[0]", self.pushup.elbow_range[0]),
            ("pushup.elbow_range[1]", self.pushup.elbow_range[1]),
            ("pushup.back_angle", self.pushup.back_angle),
            ("lunge.torso_angle", self.lunge.torso_angle),
            ("lunge.back_leg_angle", self.lunge.back_leg_angle),
            ("yoga.arm_angle", self.yoga.arm_angle),
            ("yoga.symmetry", self.yoga.symmetry),
        ];
        for (name, value) in angles {
            if !value.is_finite() || !(0.0..=180.0).contains(&value) {
                return Err(PostureError::InvalidThreshold(format!(
                    "{} must be within [0, 180] degrees, got {}",
                    name, value
                )));
            }
        }

        let margins = [
            ("squat.knee_toe_margin", self.squat.knee_toe_margin),
            ("lunge.knee_ankle_margin", self.lunge.knee_ankle_margin),
            ("yoga.shoulder_hip_margin", self.yoga.shoulder_hip_margin),
        ];
        for (name, value) in margins {
            if !value.is_finite() || value < 0.0 {
                return Err(PostureError::InvalidThreshold(format!(
                    "{} must be a non-negative distance, got {}",
                    name, value
                )));
            }
        }

        let [min, max] = self.pushup.elbow_range;
        if min > max {
            return Err(PostureError::InvalidThreshold(format!(
                "pushup.elbow_range min {} exceeds max {}",
                min, max
            )));
        }

        Ok(())
    }
}
