/// Small vector helpers on top of nalgebra
use nalgebra::{Point3, Rotation2, Vector2, Vector3};

/// Divide a vector by a scalar, yielding the zero vector when the divisor is zero
pub fn safe_div(v: Vector3<f32>, divisor: f32) -> Vector3<f32> {
    if divisor == 0.0 {
        Vector3::zeros()
    } else {
        v / divisor
    }
}

/// Unit vector in the direction of `v`, or the zero vector if `v` has no usable length
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let length = v.norm();
    if !length.is_finite() {
        return Vector3::zeros();
    }
    safe_div(v, length)
}

/// Euclidean distance between two points
pub fn distance(a: &Point3<f32>, b: &Point3<f32>) -> f32 {
    nalgebra::distance(a, b)
}

/// Rotate the pair `(a, b)` by `angle` radians in its own plane.
///
/// Returns `(a cos - b sin, a sin + b cos)`.
pub fn rotate_2d(a: f32, b: f32, angle: f32) -> (f32, f32) {
    let rotated = Rotation2::new(angle) * Vector2::new(a, b);
    (rotated.x, rotated.y)
}
