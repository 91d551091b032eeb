use crate::models::{Body, BodyKind, Vector3};
use crate::utils::{clamp, PhysicsConstants};

/// Adds the body's weight to its force accumulator.
///
/// Only active dynamic bodies feel gravity; a resting body would otherwise wake itself on
/// every tick.
pub fn apply_gravity(body: &mut Body, constants: &PhysicsConstants) {
    if body.is_dynamic() && body.is_in_motion() {
        body.force += constants.gravity_force(body.mass());
    }
}

/// Advances one body by `dt` from its accumulated force (semi-implicit Euler).
///
/// `a = F/m`, `v += a·dt`, `p += v·dt + ½·a·dt²`, then air damping and the horizontal speed
/// cap. The accumulator is emptied and the net force that was integrated is returned so the
/// sleep controller can inspect it. Static bodies are left untouched and report zero.
///
/// # Example
/// ```
/// use rs_point_physics::dynamics::integrate;
/// use rs_point_physics::models::{Body, Vector3};
/// use rs_point_physics::utils::PhysicsConstants;
///
/// let constants = PhysicsConstants::default().with_air_resistance(0.0);
/// let mut body = Body::new_dynamic(Vector3::ZERO, 2.0, Vector3::ONE).unwrap();
/// body.add_force(Vector3::new(4.0, 0.0, 0.0));
///
/// let residual = integrate(&mut body, &constants, 0.5);
/// assert_eq!(residual, Vector3::new(4.0, 0.0, 0.0));
/// assert_eq!(body.velocity, Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(body.position, Vector3::new(0.75, 0.0, 0.0));
/// assert_eq!(body.force, Vector3::ZERO);
/// ```
pub fn integrate(body: &mut Body, constants: &PhysicsConstants, dt: f64) -> Vector3 {
    let mass = match body.kind {
        BodyKind::Dynamic { mass } => mass,
        BodyKind::Static => return Vector3::ZERO,
    };

    let acceleration = body.force / mass;
    body.velocity += acceleration * dt;
    body.position += body.velocity * dt + acceleration * (0.5 * dt * dt);

    body.velocity *= 1.0 - constants.air_resistance;
    body.velocity.x = clamp(body.velocity.x, -constants.max_speed, constants.max_speed);
    body.velocity.z = clamp(body.velocity.z, -constants.max_speed, constants.max_speed);

    body.acceleration = acceleration;
    let residual = body.force;
    body.force = Vector3::ZERO;
    residual
}
