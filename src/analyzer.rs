// src/analyzer.rs - Mode selection and dispatch
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ThresholdConfig;
use crate::error::PostureError;
use crate::feedback::{AnalysisResult, FeedbackItem};
use crate::landmarks::{LandmarkSet, Side};
use crate::rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Squat,
    Desk,
    Pushup,
    Lunge,
    YogaTpose,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Squat, Mode::Desk, Mode::Pushup, Mode::Lunge, Mode::YogaTpose];

    /// Wire token, e.g. `yoga_tpose`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Squat => "squat",
            Mode::Desk => "desk",
            Mode::Pushup => "pushup",
            Mode::Lunge => "lunge",
            Mode::YogaTpose => "yoga_tpose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Squat => "Squat",
            Mode::Desk => "Desk Sitting",
            Mode::Pushup => "Pushup",
            Mode::Lunge => "Lunge",
            Mode::YogaTpose => "Yoga T-Pose",
        }
    }

    pub fn is_bilateral(self) -> bool {
        !matches!(self, Mode::YogaTpose)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = PostureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == token)
            .ok_or_else(|| PostureError::UnknownMode(s.to_string()))
    }
}

/// Run the rule set for `mode` over both sides of the body.
pub fn evaluate_mode(landmarks: &LandmarkSet, mode: Mode, config: &ThresholdConfig) -> AnalysisResult {
    let result = match mode {
        Mode::Squat => rules::analyze_squat(landmarks, &config.squat),
        Mode::Desk => rules::analyze_desk(landmarks, &config.desk),
        Mode::Pushup => rules::analyze_pushup(landmarks, &config.pushup),
        Mode::Lunge => rules::analyze_lunge(landmarks, &config.lunge),
        Mode::YogaTpose => rules::analyze_yoga_tpose(landmarks, &config.yoga),
    };
    debug!(%mode, cues = result.len(), "posture evaluated");
    result
}

/// Single-side variant. T-pose has no single-side form and evaluates both arms.
pub fn evaluate_side(
    landmarks: &LandmarkSet,
    mode: Mode,
    side: Side,
    config: &ThresholdConfig,
) -> AnalysisResult {
    match mode {
        Mode::Squat => rules::squat_side(landmarks, side, &config.squat),
        Mode::Desk => rules::desk_side(landmarks, side, &config.desk),
        Mode::Pushup => rules::pushup_side(landmarks, side, &config.pushup),
        Mode::Lunge => rules::lunge_side(landmarks, side, &config.lunge),
        Mode::YogaTpose => rules::analyze_yoga_tpose(landmarks, &config.yoga),
    }
}

/// Dispatch on a caller-supplied mode token (case-insensitive).
///
/// An unrecognized token does not fail: the result holds a single
/// "Unknown posture mode" item with zero confidence.
pub fn evaluate(landmarks: &LandmarkSet, mode: &str, config: &ThresholdConfig) -> AnalysisResult {
    match mode.parse::<Mode>() {
        Ok(mode) => evaluate_mode(landmarks, mode, config),
        Err(e) => {
            warn!("{}", e);
            AnalysisResult::from(vec![FeedbackItem::unknown_mode()])
        }
    }
}

/// [`evaluate`] with the default thresholds.
pub fn evaluate_default(landmarks: &LandmarkSet, mode: &str) -> AnalysisResult {
    evaluate(landmarks, mode, &ThresholdConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Cue;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("squat".parse::<Mode>().unwrap(), Mode::Squat);
        assert_eq!("SQUAT".parse::<Mode>().unwrap(), Mode::Squat);
        assert_eq!(" Yoga_TPose ".parse::<Mode>().unwrap(), Mode::YogaTpose);
        assert!(matches!("burpee".parse::<Mode>(), Err(PostureError::UnknownMode(_))));

        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Desk.label(), "Desk Sitting");
        assert_eq!(Mode::YogaTpose.label(), "Yoga T-Pose");
        assert!(!Mode::YogaTpose.is_bilateral());
        assert!(Mode::Lunge.is_bilateral());
    }

    #[test]
    fn test_unknown_mode_sentinel() {
        let set = LandmarkSet::default();
        let result = evaluate(&set, "burpee", &ThresholdConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result.items()[0].cue, Cue::UnknownMode);
        assert_eq!(result.items()[0].confidence, 0.0);
        assert_eq!(result.messages(), vec!["Unknown posture mode"]);
    }

    #[test]
    fn test_degenerate_pose_desk() {
        // All joints coincident: no angle is measurable, so no desk check fires
        let set = LandmarkSet::default();
        let result = evaluate_default(&set, "desk");
        assert!(result.is_empty());
    }
}
