use log::trace;
use crate::interactions::{ColliderRegistry, Ray};
use crate::models::{Body, BodyHandle, CardinalDirection, ContactRecord, ContactSet, Vector3};
use crate::utils::PhysicsConstants;

/// A surface found within `contact_epsilon` of the body's boundary along one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactCandidate {
    pub direction: CardinalDirection,
    /// Surface normal of the collider, facing the body.
    pub normal: Vector3,
    /// Body center position that puts the body exactly on the surface.
    pub point: Vector3,
    /// Ray distance from the body center to the surface.
    pub distance: f64,
    /// Distance between the body's boundary and the surface. Negative when overlapping.
    pub gap: f64,
    pub collider: BodyHandle,
}

/// Result of probing all six directions of one body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbeResult {
    slots: [Option<ContactCandidate>; 6],
}

impl ProbeResult {
    pub fn get(&self, direction: CardinalDirection) -> Option<&ContactCandidate> {
        self.slots[direction.index()].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContactCandidate> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Casts one ray per cardinal direction from the body's center and keeps the hits that
/// lie within `contact_epsilon` of the body's extent along that direction.
///
/// The body's own collider is never reported.
pub fn probe(
    body: &Body,
    handle: BodyHandle,
    registry: &ColliderRegistry,
    constants: &PhysicsConstants,
) -> ProbeResult {
    let mut result = ProbeResult::default();

    for direction in CardinalDirection::ALL {
        let ray = Ray::new(body.position, direction.unit_vector());
        let Some(hit) = registry.raycast(&ray, Some(handle)) else {
            continue;
        };

        let gap = hit.distance - body.extent_along(ray.direction);
        if gap > constants.contact_epsilon {
            continue;
        }

        let point = hit.point + hit.normal * body.extent_along(hit.normal);
        result.slots[direction.index()] = Some(ContactCandidate {
            direction,
            normal: hit.normal,
            point,
            distance: hit.distance,
            gap,
            collider: hit.collider,
        });
    }

    result
}

/// Bookkeeping of one contact update, mostly useful for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactChanges {
    pub added: usize,
    pub kept: usize,
    pub removed: usize,
}

/// Applies a probe result to a body's persistent contact set.
///
/// A contact against the same collider is kept and ages by one tick. A different collider
/// replaces the record. A direction without a candidate drops its record.
pub fn update_contacts(contacts: &mut ContactSet, probed: &ProbeResult) -> ContactChanges {
    let mut changes = ContactChanges::default();

    for direction in CardinalDirection::ALL {
        match (contacts.get(direction).copied(), probed.get(direction)) {
            (Some(existing), Some(candidate)) if existing.collider == candidate.collider => {
                contacts.insert(direction, ContactRecord {
                    normal: candidate.normal,
                    point: candidate.point,
                    distance: candidate.distance,
                    collider: candidate.collider,
                    age: existing.age.saturating_add(1),
                });
                changes.kept += 1;
            }
            (previous, Some(candidate)) => {
                trace!("Contact {} against {} (gap {:.5})", direction, candidate.collider, candidate.gap);
                if previous.is_some() {
                    changes.removed += 1;
                }
                contacts.insert(direction, ContactRecord {
                    normal: candidate.normal,
                    point: candidate.point,
                    distance: candidate.distance,
                    collider: candidate.collider,
                    age: 0,
                });
                changes.added += 1;
            }
            (Some(previous), None) => {
                trace!("Contact {} against {} lost", direction, previous.collider);
                contacts.remove(direction);
                changes.removed += 1;
            }
            (None, None) => {}
        }
    }

    changes
}
