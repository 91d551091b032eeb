use crate::utils::VECTOR_EPSILON;

/// Clamps `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics when the bounds are inverted; the upper bound wins.
///
/// # Example
/// ```
/// use rs_point_physics::utils::clamp;
///
/// assert_eq!(clamp(5.0, -1.0, 1.0), 1.0);
/// assert_eq!(clamp(-5.0, -1.0, 1.0), -1.0);
/// assert_eq!(clamp(0.5, -1.0, 1.0), 0.5);
/// ```
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    max.min(min.max(value))
}

/// Sign of `value` as -1, 0 or 1 (zero maps to zero, unlike `f64::signum`).
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < VECTOR_EPSILON
}
