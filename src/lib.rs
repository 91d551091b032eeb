//! Rigid-point game physics core.
//!
//! Bodies accumulate forces, probe their surroundings with six axis-aligned rays, resolve
//! contacts as bounces or resting support with friction, integrate with semi-implicit Euler
//! and fall asleep once idle. [`apis::PhysicsWorld`] is the handle-based entry point.

pub mod utils;
pub mod errors;
pub mod models;
pub mod interactions;
pub mod dynamics;
pub mod apis;

pub use apis::{PhysicsWorld, StepReport};
pub use errors::PhysicsError;
pub use models::{BodyHandle, CardinalDirection, Quaternion, Vector3};
pub use utils::PhysicsConstants;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
