// src/geometry.rs
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Angle at vertex `b` between rays b->a and b->c, in degrees within [0, 180].
///
/// Coincident points give 0.0. Rule checks use [`try_angle`] instead and skip
/// such geometry rather than reporting on it.
pub fn calculate_angle(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    try_angle(a, b, c).unwrap_or(0.0)
}

/// Like [`calculate_angle`], but `None` when `a` or `c` coincides with `b`.
pub fn try_angle(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    angle_between_vectors(&ba, &bc).map(f64::to_degrees)
}

// Radians
fn angle_between_vectors(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Option<f64> {
    let mag1 = v1.norm();
    let mag2 = v2.norm();

    if mag1 == 0.0 || mag2 == 0.0 {
        return None;
    }

    let cos_angle = (v1.dot(v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos())
}

/// Coordinate axis used by the directional margin checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn component(self, v: &Vector3<f64>) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}
