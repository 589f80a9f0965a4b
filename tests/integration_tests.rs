//! Integration tests for the posture rule engine

use approx::assert_relative_eq;
use posture_coach::{
    calculate_angle, evaluate, evaluate_default, evaluate_mode, evaluate_side, Cue, Joint,
    LandmarkPoint, LandmarkSet, Mode, Side, ThresholdConfig, LANDMARK_COUNT,
};

/// Standing pose in an image-style frame (y grows downward), arms out in a T.
fn standing_pose() -> LandmarkSet {
    let mut set = LandmarkSet::default();
    let points = [
        (Joint::Nose, [0.0, -0.65, 0.0]),
        (Joint::LeftEar, [0.07, -0.62, 0.0]),
        (Joint::RightEar, [-0.07, -0.62, 0.0]),
        (Joint::LeftShoulder, [0.18, -0.45, 0.0]),
        (Joint::RightShoulder, [-0.18, -0.45, 0.0]),
        (Joint::LeftElbow, [0.45, -0.45, 0.0]),
        (Joint::RightElbow, [-0.45, -0.45, 0.0]),
        (Joint::LeftWrist, [0.72, -0.45, 0.0]),
        (Joint::RightWrist, [-0.72, -0.45, 0.0]),
        (Joint::LeftHip, [0.12, 0.0, 0.0]),
        (Joint::RightHip, [-0.12, 0.0, 0.0]),
        (Joint::LeftKnee, [0.12, 0.45, 0.0]),
        (Joint::RightKnee, [-0.12, 0.45, 0.0]),
        (Joint::LeftAnkle, [0.12, 0.9, 0.0]),
        (Joint::RightAnkle, [-0.12, 0.9, 0.0]),
        (Joint::LeftFootIndex, [0.14, 0.95, -0.1]),
        (Joint::RightFootIndex, [-0.10, 0.95, -0.1]),
    ];
    for (joint, [x, y, z]) in points {
        set.set(joint, LandmarkPoint::new(x, y, z, 0.95));
    }
    set
}

fn with_point(mut set: LandmarkSet, joint: Joint, xyz: [f64; 3], visibility: f64) -> LandmarkSet {
    set.set(joint, LandmarkPoint::new(xyz[0], xyz[1], xyz[2], visibility));
    set
}

fn back_scenario(knee: [f64; 3]) -> LandmarkSet {
    let set = with_point(LandmarkSet::default(), Joint::LeftShoulder, [0.0, 0.0, 0.0], 0.9);
    let set = with_point(set, Joint::LeftHip, [0.0, -1.0, 0.0], 0.7);
    let set = with_point(set, Joint::LeftKnee, knee, 0.8);
    // Foot ahead of the knee so only the back check is in play
    with_point(set, Joint::LeftFootIndex, [2.0, -2.5, 0.0], 0.9)
}

#[test]
fn test_straight_line_back_gives_no_feedback() {
    let set = back_scenario([0.0, -2.0, 0.0]);
    let result = evaluate_side(&set, Mode::Squat, Side::Left, &ThresholdConfig::default());
    assert!(!result.contains(Cue::StraightenBack));
}

#[test]
fn test_bent_back_flags_with_weakest_confidence() {
    let set = back_scenario([0.8, -1.8, 0.0]);
    let result = evaluate_side(&set, Mode::Squat, Side::Left, &ThresholdConfig::default());
    let item = result
        .find(Cue::StraightenBack, Some(Side::Left))
        .expect("bent back should be flagged");
    assert_relative_eq!(item.confidence, 0.7);
    assert_eq!(item.message(), "LEFT: Straighten your back");
}

#[test]
fn test_mode_token_is_case_insensitive() {
    let set = back_scenario([0.8, -1.8, 0.0]);
    let lower = evaluate_default(&set, "squat");
    let upper = evaluate_default(&set, "SQUAT");
    let mixed = evaluate_default(&set, "SqUaT");
    assert!(!lower.is_empty());
    assert_eq!(lower, upper);
    assert_eq!(lower, mixed);
}

#[test]
fn test_unknown_mode_returns_single_sentinel() {
    let result = evaluate_default(&standing_pose(), "burpee");
    assert_eq!(result.len(), 1);
    assert_eq!(result.items()[0].cue, Cue::UnknownMode);
    assert_eq!(result.messages(), vec!["Unknown posture mode"]);
}

#[test]
fn test_good_tpose_is_clean() {
    let mut config = ThresholdConfig::default();
    // Shoulders sit well above the hips in this frame
    config.yoga.shoulder_hip_margin = 0.5;
    let result = evaluate_mode(&standing_pose(), Mode::YogaTpose, &config);
    assert!(result.is_empty(), "unexpected feedback: {:?}", result.messages());
}

#[test]
fn test_default_tpose_flags_shoulder_gap() {
    let result = evaluate_default(&standing_pose(), "yoga_tpose");
    assert_eq!(
        result.messages(),
        vec!["Relax your left shoulder", "Relax your right shoulder"]
    );
}

#[test]
fn test_evaluation_is_deterministic() {
    let set = with_point(standing_pose(), Joint::RightKnee, [-0.5, 0.3, 0.0], 0.4);
    let config = ThresholdConfig::default();
    for mode in Mode::ALL {
        let first = evaluate_mode(&set, mode, &config);
        let second = evaluate_mode(&set, mode, &config);
        assert_eq!(first, second, "mode {} is not deterministic", mode);
    }
}

#[test]
fn test_confidence_never_exceeds_any_visibility() {
    // Perturb visibilities so each joint differs
    let mut set = with_point(standing_pose(), Joint::LeftKnee, [0.6, 0.3, 0.0], 0.95);
    for (i, joint) in Joint::ALL.iter().enumerate() {
        let mut p = *set.point(joint.index());
        p.visibility = 0.3 + (i as f64 * 0.37) % 0.7;
        set.set(*joint, p);
    }
    let config = ThresholdConfig::default();
    let max_visibility = set
        .points()
        .iter()
        .map(|p| p.visibility)
        .fold(f64::MIN, f64::max);

    for mode in Mode::ALL {
        for item in evaluate_mode(&set, mode, &config).iter() {
            assert!((0.0..=1.0).contains(&item.confidence));
            assert!(item.confidence <= max_visibility);
        }
    }
}

#[test]
fn test_overrides_apply_per_call_only() {
    let set = back_scenario([0.8, -1.8, 0.0]);

    let mut lenient = ThresholdConfig::default();
    lenient.squat.back_angle = 120.0;
    let relaxed = evaluate(&set, "squat", &lenient);
    assert!(!relaxed.contains(Cue::StraightenBack));

    let strict = evaluate_default(&set, "squat");
    assert!(strict.contains(Cue::StraightenBack));
}

#[test]
fn test_lunge_forward_axis_is_configurable() {
    // Knee ahead of the ankle in depth (z) but not along x
    let set = with_point(standing_pose(), Joint::LeftKnee, [0.12, 0.45, -0.3], 0.9);

    let result = evaluate_side(&set, Mode::Lunge, Side::Left, &ThresholdConfig::default());
    assert!(!result.contains(Cue::KneePastAnkle));

    let mut config = ThresholdConfig::default();
    config.lunge.forward_axis = posture_coach::Axis::Z;
    let set = with_point(set, Joint::LeftKnee, [0.12, 0.45, 0.3], 0.9);
    let result = evaluate_side(&set, Mode::Lunge, Side::Left, &config);
    assert!(result.contains(Cue::KneePastAnkle));
}

#[test]
fn test_parallel_calls_are_independent() {
    let set = back_scenario([0.8, -1.8, 0.0]);
    let expected = evaluate_default(&set, "squat");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| evaluate_default(&set, "squat")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_json_round_trip_through_public_api() {
    let point = r#"{"x": 0.0, "y": 0.0, "z": 0.0, "visibility": 0.5}"#;
    let json = format!("[{}]", vec![point; LANDMARK_COUNT].join(","));
    let set: LandmarkSet = serde_json::from_str(&json).unwrap();
    let set = with_point(set, Joint::LeftShoulder, [0.0, 0.0, 0.0], 0.9);
    let set = with_point(set, Joint::LeftHip, [0.0, -1.0, 0.0], 0.6);
    let set = with_point(set, Joint::LeftKnee, [0.8, -1.8, 0.0], 0.8);
    let set = with_point(set, Joint::LeftEar, [0.3, 0.1, 0.0], 0.5);

    let result = evaluate_side(&set, Mode::Desk, Side::Left, &ThresholdConfig::default());
    let value = serde_json::to_value(&result).unwrap();
    let first = &value[0];
    assert_eq!(first["message"], "LEFT: Lift your head");
    assert_relative_eq!(first["confidence"].as_f64().unwrap(), 0.5);
}

#[test]
fn test_angle_helper_exported() {
    let a = LandmarkPoint::new(1.0, 0.0, 0.0, 1.0).position();
    let b = LandmarkPoint::new(0.0, 0.0, 0.0, 1.0).position();
    let c = LandmarkPoint::new(0.0, 0.0, 1.0, 1.0).position();
    assert_relative_eq!(calculate_angle(&a, &b, &c), 90.0, epsilon = 1e-9);
}
