//! Posture feedback from BlazePose landmarks.
//!
//! Takes the 33 world-space landmarks produced by a pose model and turns them
//! into corrective cues for one of five modes: squat, desk sitting, push-up,
//! lunge and yoga T-pose. Everything here is pure and stateless; each call is
//! independent and safe to run in parallel with any other.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod landmarks;
pub mod rules;

pub use analyzer::{evaluate, evaluate_default, evaluate_mode, evaluate_side, Mode};
pub use config::{
    DeskThresholds, LungeThresholds, PushupThresholds, SquatThresholds, ThresholdConfig,
    YogaThresholds,
};
pub use error::{PostureError, Result};
pub use feedback::{AnalysisResult, Cue, FeedbackItem};
pub use geometry::{calculate_angle, try_angle, Axis};
pub use landmarks::{get_point, Joint, LandmarkPoint, LandmarkSet, Side, LANDMARK_COUNT};
