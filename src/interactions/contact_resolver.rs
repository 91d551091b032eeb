use log::{debug, trace};
use crate::models::{Body, ContactRecord, Vector3};
use crate::utils::PhysicsConstants;

/// How a contact is handled this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactClass {
    /// The body hits the surface faster than the impact threshold: bounce.
    Impact,
    /// Slow contact: support against the surface and friction along it.
    Rest,
}

/// Classifies a contact by the body's approach speed along the contact normal.
///
/// # Example
/// ```
/// use rs_point_physics::interactions::{classify, ContactClass};
/// use rs_point_physics::models::Vector3;
/// use rs_point_physics::utils::PhysicsConstants;
///
/// let constants = PhysicsConstants::default();
/// assert_eq!(classify(Vector3::new(0.0, -3.0, 0.0), Vector3::UP, &constants), ContactClass::Impact);
/// assert_eq!(classify(Vector3::new(4.0, -0.1, 0.0), Vector3::UP, &constants), ContactClass::Rest);
/// assert_eq!(classify(Vector3::new(0.0, 3.0, 0.0), Vector3::UP, &constants), ContactClass::Rest);
/// ```
pub fn classify(velocity: Vector3, normal: Vector3, constants: &PhysicsConstants) -> ContactClass {
    if -velocity.dot(normal) > constants.impact_velocity_threshold {
        ContactClass::Impact
    } else {
        ContactClass::Rest
    }
}

/// Moves the body out of the surface along the contact normal. Never pulls it in.
fn correct_penetration(body: &mut Body, contact: &ContactRecord) {
    let depth = (contact.point - body.position).dot(contact.normal);
    if depth > 0.0 {
        body.position += contact.normal * depth;
    }
}

/// Turns one contact into forces on the body's accumulator and corrects overlap.
///
/// Impacts add the force that replaces the normal velocity `v·n` with `-r(v·n)` over one
/// step. Rests cancel the inward part of the accumulated force, the inward velocity, and
/// add Coulomb friction capped so that it never reverses the tangential velocity.
/// Nothing happens for static bodies, a non-positive `dt` or a body leaving the surface faster
/// than the impact threshold.
pub fn resolve(
    body: &mut Body,
    contact: &ContactRecord,
    constants: &PhysicsConstants,
    dt: f64,
) -> ContactClass {
    let normal = contact.normal;
    let class = classify(body.velocity, normal, constants);
    let mass = body.mass();
    if !body.is_dynamic() || dt <= 0.0 {
        return class;
    }

    let normal_speed = body.velocity.dot(normal);

    match class {
        ContactClass::Impact => {
            let delta_v = normal * (-(1.0 + constants.restitution) * normal_speed);
            debug!("Impact against {} at {:.3} m/s", contact.collider, -normal_speed);
            body.force += delta_v * (mass / dt);
            correct_penetration(body, contact);
        }
        ContactClass::Rest => {
            if normal_speed > constants.impact_velocity_threshold {
                // leaving the surface
                return class;
            }
            let inward_force = body.force.dot(normal);
            let support = if inward_force < 0.0 { -inward_force } else { 0.0 };
            body.force += normal * support;

            if normal_speed < 0.0 {
                body.force += normal * (-mass * normal_speed / dt);
            }

            let tangential = body.velocity.reject_from(normal);
            let tangential_speed = tangential.length();
            if support > 0.0 && tangential_speed > 0.0 && constants.friction > 0.0 {
                let magnitude = (constants.friction * support).min(mass * tangential_speed / dt);
                body.force -= tangential * (magnitude / tangential_speed);
            }

            trace!("Resting on {} (support {:.4})", contact.collider, support);
            correct_penetration(body, contact);
        }
    }

    class
}
