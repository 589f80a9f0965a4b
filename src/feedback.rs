// src/feedback.rs - Corrective cues and per-call results
use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::landmarks::{Joint, LandmarkSet, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    StraightenBack,
    KneesPastToes,
    LiftHead,
    BackStraighter,
    AdjustElbowBend,
    KeepBackStraight,
    DontDropHips,
    KneePastAnkle,
    TorsoUpright,
    StraightenBackLeg,
    LeftArmStraight,
    RightArmStraight,
    RelaxLeftShoulder,
    RelaxRightShoulder,
    ArmsLevel,
    UnknownMode,
}

impl Cue {
    pub fn message(self) -> &'static str {
        match self {
            Cue::StraightenBack => "Straighten your back",
            Cue::KneesPastToes => "Knees are past toes",
            Cue::LiftHead => "Lift your head",
            Cue::BackStraighter => "Keep your back straighter",
            Cue::AdjustElbowBend => "Adjust elbow bend",
            Cue::KeepBackStraight => "Keep your back straight",
            Cue::DontDropHips => "Don't drop your hips",
            Cue::KneePastAnkle => "Knee is past ankle",
            Cue::TorsoUpright => "Keep your torso upright",
            Cue::StraightenBackLeg => "Straighten back leg",
            Cue::LeftArmStraight => "Keep left arm straight",
            Cue::RightArmStraight => "Keep right arm straight",
            Cue::RelaxLeftShoulder => "Relax your left shoulder",
            Cue::RelaxRightShoulder => "Relax your right shoulder",
            Cue::ArmsLevel => "Keep both arms level",
            Cue::UnknownMode => "Unknown posture mode",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One triggered check. Serializes as `{"message": .., "confidence": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackItem {
    pub cue: Cue,
    pub side: Option<Side>,
    pub confidence: f64,
}

impl FeedbackItem {
    pub fn new(cue: Cue, confidence: f64) -> Self {
        Self { cue, side: None, confidence }
    }

    pub fn sided(cue: Cue, side: Side, confidence: f64) -> Self {
        Self { cue, side: Some(side), confidence }
    }

    pub fn unknown_mode() -> Self {
        Self::new(Cue::UnknownMode, 0.0)
    }

    /// Message text, prefixed with `LEFT: ` / `RIGHT: ` for side-specific checks.
    pub fn message(&self) -> String {
        match self.side {
            Some(side) => format!("{}: {}", side.tag(), self.cue.message()),
            None => self.cue.message().to_string(),
        }
    }
}

impl fmt::Display for FeedbackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.message(), self.confidence)
    }
}

impl Serialize for FeedbackItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FeedbackItem", 2)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("confidence", &self.confidence)?;
        state.end()
    }
}

/// Feedback in the order the checks were evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    items: Vec<FeedbackItem>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: FeedbackItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, other: AnalysisResult) {
        self.items.extend(other.items);
    }

    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedbackItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, cue: Cue) -> bool {
        self.items.iter().any(|item| item.cue == cue)
    }

    pub fn find(&self, cue: Cue, side: Option<Side>) -> Option<&FeedbackItem> {
        self.items.iter().find(|item| item.cue == cue && item.side == side)
    }

    /// Message-only view, for callers that do not surface confidence.
    pub fn messages(&self) -> Vec<String> {
        self.items.iter().map(FeedbackItem::message).collect()
    }

    pub fn into_items(self) -> Vec<FeedbackItem> {
        self.items
    }
}

impl From<Vec<FeedbackItem>> for AnalysisResult {
    fn from(items: Vec<FeedbackItem>) -> Self {
        Self { items }
    }
}

impl IntoIterator for AnalysisResult {
    type Item = FeedbackItem;
    type IntoIter = std::vec::IntoIter<FeedbackItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a FeedbackItem;
    type IntoIter = std::slice::Iter<'a, FeedbackItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Weakest-link confidence: the lowest visibility among `joints`.
pub fn min_visibility(landmarks: &LandmarkSet, joints: &[Joint]) -> f64 {
    joints
        .iter()
        .map(|joint| landmarks.visibility(*joint))
        .reduce(f64::min)
        .unwrap_or(0.0)
}
