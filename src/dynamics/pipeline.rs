use crate::dynamics::{apply_gravity, integrate, settle};
use crate::interactions::{probe, resolve, update_contacts, ColliderRegistry};
use crate::models::{Body, BodyHandle};
use crate::utils::PhysicsConstants;

/// What happened to one body during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStep {
    /// Static or resting: nothing was done.
    Skipped,
    /// Integrated and still active.
    Integrated,
    /// Integrated, then halted by the sleep controller.
    FellAsleep,
}

/// One body's full tick: gravity, probe, contact resolution in direction order, integration
/// and the sleep check.
///
/// `registry` holds collider poses from the end of the previous tick.
pub fn step_body(
    handle: BodyHandle,
    body: &mut Body,
    registry: &ColliderRegistry,
    constants: &PhysicsConstants,
    dt: f64,
) -> BodyStep {
    if !body.is_dynamic() || !body.is_in_motion() {
        return BodyStep::Skipped;
    }

    apply_gravity(body, constants);

    let probed = probe(body, handle, registry, constants);
    update_contacts(&mut body.contacts, &probed);

    let contacts = body.contacts.clone();
    for (_, contact) in contacts.iter() {
        resolve(body, contact, constants, dt);
    }

    let residual = integrate(body, constants, dt);
    if settle(body, residual, constants) {
        BodyStep::FellAsleep
    } else {
        BodyStep::Integrated
    }
}
