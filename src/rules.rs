// src/rules.rs - Posture rule sets, one per mode
//
// Every check is independent: each one that fails its threshold appends a
// single FeedbackItem, in the order written below. Confidence is always the
// lowest visibility among the joints the check reads. An angle check whose
// joints coincide is skipped; the other checks still run.
use tracing::debug;

use crate::config::{DeskThresholds, LungeThresholds, PushupThresholds, SquatThresholds, YogaThresholds};
use crate::feedback::{min_visibility, AnalysisResult, Cue, FeedbackItem};
use crate::geometry::try_angle;
use crate::landmarks::{Joint, LandmarkSet, Side};

fn angle_at(landmarks: &LandmarkSet, a: Joint, b: Joint, c: Joint) -> Option<f64> {
    try_angle(
        &landmarks.position(a),
        &landmarks.position(b),
        &landmarks.position(c),
    )
}

fn flag(
    result: &mut AnalysisResult,
    landmarks: &LandmarkSet,
    cue: Cue,
    side: Option<Side>,
    joints: &[Joint],
) {
    let confidence = min_visibility(landmarks, joints);
    result.push(FeedbackItem { cue, side, confidence });
}

fn bilateral<F>(per_side: F) -> AnalysisResult
where
    F: Fn(Side) -> AnalysisResult,
{
    let mut result = AnalysisResult::new();
    for side in Side::BOTH {
        result.extend(per_side(side));
    }
    result
}

pub fn squat_side(landmarks: &LandmarkSet, side: Side, config: &SquatThresholds) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    let (shoulder, hip, knee, foot) = (side.shoulder(), side.hip(), side.knee(), side.foot_index());

    let back_angle = angle_at(landmarks, shoulder, hip, knee);
    debug!(%side, ?back_angle, threshold = config.back_angle, "squat back angle");
    if back_angle.is_some_and(|angle| angle < config.back_angle) {
        flag(&mut result, landmarks, Cue::StraightenBack, Some(side), &[shoulder, hip, knee]);
    }

    let axis = config.forward_axis;
    let knee_pos = axis.component(&landmarks.position(knee));
    let foot_pos = axis.component(&landmarks.position(foot));
    debug!(%side, knee_pos, foot_pos, margin = config.knee_toe_margin, "squat knee vs toe");
    if knee_pos > foot_pos + config.knee_toe_margin {
        flag(&mut result, landmarks, Cue::KneesPastToes, Some(side), &[knee, foot]);
    }

    result
}

pub fn analyze_squat(landmarks: &LandmarkSet, config: &SquatThresholds) -> AnalysisResult {
    bilateral(|side| squat_side(landmarks, side, config))
}

pub fn desk_side(landmarks: &LandmarkSet, side: Side, config: &DeskThresholds) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    let (ear, shoulder, hip, knee) = (side.ear(), side.shoulder(), side.hip(), side.knee());

    let neck_angle = angle_at(landmarks, ear, shoulder, hip);
    debug!(%side, ?neck_angle, threshold = config.neck_angle, "desk neck angle");
    if neck_angle.is_some_and(|angle| angle < config.neck_angle) {
        flag(&mut result, landmarks, Cue::LiftHead, Some(side), &[ear, shoulder, hip]);
    }

    let back_angle = angle_at(landmarks, shoulder, hip, knee);
    debug!(%side, ?back_angle, threshold = config.back_angle, "desk back angle");
    if back_angle.is_some_and(|angle| angle < config.back_angle) {
        flag(&mut result, landmarks, Cue::BackStraighter, Some(side), &[shoulder, hip, knee]);
    }

    result
}

pub fn analyze_desk(landmarks: &LandmarkSet, config: &DeskThresholds) -> AnalysisResult {
    bilateral(|side| desk_side(landmarks, side, config))
}

pub fn pushup_side(landmarks: &LandmarkSet, side: Side, config: &PushupThresholds) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    let (shoulder, elbow, wrist) = (side.shoulder(), side.elbow(), side.wrist());
    let (hip, knee, ankle) = (side.hip(), side.knee(), side.ankle());

    let elbow_angle = angle_at(landmarks, shoulder, elbow, wrist);
    let [min, max] = config.elbow_range;
    debug!(%side, ?elbow_angle, min, max, "pushup elbow angle");
    if elbow_angle.is_some_and(|angle| !(min..=max).contains(&angle)) {
        flag(&mut result, landmarks, Cue::AdjustElbowBend, Some(side), &[shoulder, elbow, wrist]);
    }

    let back_angle = angle_at(landmarks, shoulder, hip, ankle);
    debug!(%side, ?back_angle, threshold = config.back_angle, "pushup back angle");
    if back_angle.is_some_and(|angle| angle < config.back_angle) {
        flag(&mut result, landmarks, Cue::KeepBackStraight, Some(side), &[shoulder, hip, ankle]);
    }

    // Image-style y axis: a larger y sits lower.
    let hip_y = landmarks.position(hip).y;
    let shoulder_y = landmarks.position(shoulder).y;
    let knee_y = landmarks.position(knee).y;
    debug!(%side, hip_y, shoulder_y, knee_y, "pushup hip height");
    if hip_y > shoulder_y || hip_y > knee_y {
        flag(&mut result, landmarks, Cue::DontDropHips, Some(side), &[hip, shoulder, knee]);
    }

    result
}

pub fn analyze_pushup(landmarks: &LandmarkSet, config: &PushupThresholds) -> AnalysisResult {
    bilateral(|side| pushup_side(landmarks, side, config))
}

pub fn lunge_side(landmarks: &LandmarkSet, side: Side, config: &LungeThresholds) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    let (shoulder, hip, knee, ankle) = (side.shoulder(), side.hip(), side.knee(), side.ankle());

    let axis = config.forward_axis;
    let knee_pos = axis.component(&landmarks.position(knee));
    let ankle_pos = axis.component(&landmarks.position(ankle));
    debug!(%side, knee_pos, ankle_pos, margin = config.knee_ankle_margin, "lunge knee vs ankle");
    if knee_pos > ankle_pos + config.knee_ankle_margin {
        flag(&mut result, landmarks, Cue::KneePastAnkle, Some(side), &[knee, ankle]);
    }

    let torso_angle = angle_at(landmarks, shoulder, hip, knee);
    debug!(%side, ?torso_angle, threshold = config.torso_angle, "lunge torso angle");
    if torso_angle.is_some_and(|angle| angle < config.torso_angle) {
        flag(&mut result, landmarks, Cue::TorsoUpright, Some(side), &[shoulder, hip, knee]);
    }

    let back_leg_angle = angle_at(landmarks, hip, knee, ankle);
    debug!(%side, ?back_leg_angle, threshold = config.back_leg_angle, "lunge back leg angle");
    if back_leg_angle.is_some_and(|angle| angle < config.back_leg_angle) {
        flag(&mut result, landmarks, Cue::StraightenBackLeg, Some(side), &[hip, knee, ankle]);
    }

    result
}

pub fn analyze_lunge(landmarks: &LandmarkSet, config: &LungeThresholds) -> AnalysisResult {
    bilateral(|side| lunge_side(landmarks, side, config))
}

/// T-pose checks both arms together since it also compares them.
pub fn analyze_yoga_tpose(landmarks: &LandmarkSet, config: &YogaThresholds) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    let left_arm = [Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist];
    let right_arm = [Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist];

    let left_angle = angle_at(landmarks, left_arm[0], left_arm[1], left_arm[2]);
    let right_angle = angle_at(landmarks, right_arm[0], right_arm[1], right_arm[2]);
    debug!(?left_angle, ?right_angle, threshold = config.arm_angle, "t-pose arm angles");

    if left_angle.is_some_and(|angle| angle < config.arm_angle) {
        flag(&mut result, landmarks, Cue::LeftArmStraight, None, &left_arm);
    }
    if right_angle.is_some_and(|angle| angle < config.arm_angle) {
        flag(&mut result, landmarks, Cue::RightArmStraight, None, &right_arm);
    }

    let shoulder_checks = [
        (Side::Left, Cue::RelaxLeftShoulder),
        (Side::Right, Cue::RelaxRightShoulder),
    ];
    for (side, cue) in shoulder_checks {
        let gap = (landmarks.position(side.shoulder()).y - landmarks.position(side.hip()).y).abs();
        debug!(%side, gap, margin = config.shoulder_hip_margin, "t-pose shoulder-hip gap");
        if gap > config.shoulder_hip_margin {
            flag(&mut result, landmarks, cue, None, &[side.shoulder(), side.hip()]);
        }
    }

    // Symmetry needs both arms measurable
    if let (Some(left), Some(right)) = (left_angle, right_angle) {
        if (left - right).abs() > config.symmetry {
            let arms = [left_arm, right_arm].concat();
            flag(&mut result, landmarks, Cue::ArmsLevel, None, &arms);
        }
    }

    result
}
