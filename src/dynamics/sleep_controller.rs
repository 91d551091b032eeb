use log::debug;
use crate::models::{Body, Vector3};
use crate::utils::PhysicsConstants;

/// True when an integrated, supported body is slow enough and the force it just integrated
/// small enough for it to be halted.
///
/// The force threshold is per unit mass, so a light body is held to the same residual
/// acceleration as a heavy one. A body with no contacts never sleeps.
pub fn should_sleep(body: &Body, residual_force: Vector3, constants: &PhysicsConstants) -> bool {
    if !body.is_dynamic() || !body.is_in_motion() || body.contacts.is_empty() {
        return false;
    }
    body.velocity.length() < constants.sleep_velocity_threshold
        && residual_force.length() / body.mass() < constants.sleep_force_threshold
}

/// Runs the Active → Resting transition. Returns `true` if the body went to sleep.
///
/// A sleeping body has exactly zero velocity, acceleration and force.
///
/// # Example
/// ```
/// use rs_point_physics::dynamics::settle;
/// use rs_point_physics::models::{Body, BodyHandle, CardinalDirection, ContactRecord, MotionState, Vector3};
/// use rs_point_physics::utils::PhysicsConstants;
///
/// let mut body = Body::new_dynamic(Vector3::new(0.0, 1.0, 0.0), 1.0, Vector3::ONE).unwrap();
/// body.velocity = Vector3::new(0.001, 0.0, 0.0);
/// body.contacts.insert(CardinalDirection::Down, ContactRecord {
///     normal: Vector3::UP,
///     point: Vector3::new(0.0, 1.0, 0.0),
///     distance: 1.0,
///     collider: BodyHandle::new(1, 0),
///     age: 0,
/// });
///
/// assert!(settle(&mut body, Vector3::ZERO, &PhysicsConstants::default()));
/// assert_eq!(body.state, MotionState::Resting);
/// assert_eq!(body.velocity, Vector3::ZERO);
/// ```
pub fn settle(body: &mut Body, residual_force: Vector3, constants: &PhysicsConstants) -> bool {
    if !should_sleep(body, residual_force, constants) {
        return false;
    }
    debug!("Body at rest at {:?}", body.position);
    body.halt();
    true
}
