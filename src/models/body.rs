use std::fmt;
use log::debug;
use crate::errors::PhysicsError;
use crate::models::{CardinalDirection, Quaternion, Vector3};

/// Generational index identifying a body inside a [`PhysicsWorld`](crate::apis::PhysicsWorld).
///
/// The rendering side keeps this handle next to its mesh instead of a reference to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    pub index: u32,
    pub generation: u32,
}

impl BodyHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        BodyHandle { index, generation }
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Static colliders take part in collision queries only; dynamic bodies are integrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Static,
    Dynamic { mass: f64 },
}

impl BodyKind {
    /// Validates `mass` once, at creation time.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::BodyKind;
    ///
    /// assert!(BodyKind::dynamic(2.0).is_ok());
    /// assert!(BodyKind::dynamic(0.0).is_err());
    /// ```
    pub fn dynamic(mass: f64) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(BodyKind::Dynamic { mass })
    }

    /// Mass of the body; static colliders report zero.
    pub fn mass(&self) -> f64 {
        match self {
            BodyKind::Static => 0.0,
            BodyKind::Dynamic { mass } => *mass,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, BodyKind::Dynamic { .. })
    }
}

/// Sleep state machine of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Integrated every tick.
    Active,
    /// Halted: zero velocity, acceleration and force until woken.
    Resting,
}

/// A persistent contact along one probe direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord {
    /// World-space surface normal of the collider, pointing towards the body.
    pub normal: Vector3,
    /// Where the body's center sits when it touches the surface without overlap.
    pub point: Vector3,
    /// Hit distance from the body center along the probe direction.
    pub distance: f64,
    pub collider: BodyHandle,
    /// Number of consecutive ticks this contact has been kept.
    pub age: u32,
}

/// Contact slots keyed by [`CardinalDirection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet {
    slots: [Option<ContactRecord>; 6],
}

impl ContactSet {
    pub fn new() -> Self {
        ContactSet::default()
    }

    pub fn get(&self, direction: CardinalDirection) -> Option<&ContactRecord> {
        self.slots[direction.index()].as_ref()
    }

    pub fn insert(&mut self, direction: CardinalDirection, record: ContactRecord) -> Option<ContactRecord> {
        self.slots[direction.index()].replace(record)
    }

    pub fn remove(&mut self, direction: CardinalDirection) -> Option<ContactRecord> {
        self.slots[direction.index()].take()
    }

    pub fn clear(&mut self) {
        self.slots = [None; 6];
    }

    pub fn contains(&self, direction: CardinalDirection) -> bool {
        self.slots[direction.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Populated slots in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (CardinalDirection, &ContactRecord)> {
        CardinalDirection::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(direction, slot)| slot.as_ref().map(|record| (direction, record)))
    }

    /// Direction → normal pairs, the view consumed by movement logic.
    pub fn normals(&self) -> Vec<(CardinalDirection, Vector3)> {
        self.iter().map(|(direction, record)| (direction, record.normal)).collect()
    }

    pub fn references(&self, collider: BodyHandle) -> bool {
        self.iter().any(|(_, record)| record.collider == collider)
    }
}

/// Per-entity physics state.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub position: Vector3,
    pub velocity: Vector3,
    pub acceleration: Vector3,
    /// Force accumulator, emptied after every integration step.
    pub force: Vector3,
    /// Half-size of the bounding box along each local axis.
    pub half_extent: Vector3,
    pub orientation: Quaternion,
    pub state: MotionState,
    pub contacts: ContactSet,
    /// Disabled bodies are invisible to every probe (decorative attachments).
    pub collision_enabled: bool,
    /// Remaining lifetime for timed bodies such as projectiles.
    pub lifetime: Option<f64>,
}

fn validate_extent(half_extent: Vector3) -> Result<(), PhysicsError> {
    if !half_extent.is_finite() || half_extent.x < 0.0 || half_extent.y < 0.0 || half_extent.z < 0.0 {
        return Err(PhysicsError::InvalidExtent);
    }
    Ok(())
}

impl Body {
    /// Creates a dynamic body at rest that will start falling on the next tick.
    ///
    /// # Errors
    /// `InvalidMass` for a mass that is not strictly positive, `InvalidExtent` or
    /// `InvalidVector` for bad geometry.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::{Body, MotionState, Vector3};
    ///
    /// let body = Body::new_dynamic(Vector3::new(0.0, 5.0, 0.0), 1.0, Vector3::ONE).unwrap();
    /// assert_eq!(body.mass(), 1.0);
    /// assert_eq!(body.state, MotionState::Active);
    /// assert!(Body::new_dynamic(Vector3::ZERO, -1.0, Vector3::ONE).is_err());
    /// ```
    pub fn new_dynamic(position: Vector3, mass: f64, half_extent: Vector3) -> Result<Self, PhysicsError> {
        let kind = BodyKind::dynamic(mass)?;
        Body::with_kind(kind, position, half_extent, MotionState::Active)
    }

    /// Creates a static collider (mass zero, never integrated).
    pub fn new_static(position: Vector3, half_extent: Vector3) -> Result<Self, PhysicsError> {
        Body::with_kind(BodyKind::Static, position, half_extent, MotionState::Resting)
    }

    fn with_kind(kind: BodyKind, position: Vector3, half_extent: Vector3, state: MotionState) -> Result<Self, PhysicsError> {
        if !position.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        validate_extent(half_extent)?;
        Ok(Body {
            kind,
            position,
            velocity: Vector3::ZERO,
            acceleration: Vector3::ZERO,
            force: Vector3::ZERO,
            half_extent,
            orientation: Quaternion::identity(),
            state,
            contacts: ContactSet::new(),
            collision_enabled: true,
            lifetime: None,
        })
    }

    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation.normalized();
        self
    }

    pub fn mass(&self) -> f64 {
        self.kind.mass()
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind.is_dynamic()
    }

    pub fn is_in_motion(&self) -> bool {
        self.state == MotionState::Active
    }

    /// Queues a force for the next integration step. A non-zero force wakes a resting body.
    pub fn add_force(&mut self, force: Vector3) {
        self.force += force;
        if !force.is_zero() {
            self.wake();
        }
    }

    pub fn wake(&mut self) {
        if self.is_dynamic() && self.state == MotionState::Resting {
            debug!("Body woken at {:?}", self.position);
            self.state = MotionState::Active;
        }
    }

    /// Transition to `Resting`, forcing the kinematic state to exactly zero.
    pub fn halt(&mut self) {
        self.velocity = Vector3::ZERO;
        self.acceleration = Vector3::ZERO;
        self.force = Vector3::ZERO;
        self.state = MotionState::Resting;
    }

    /// Extent of the (possibly rotated) bounding box along a world-space unit direction.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::{Body, Vector3};
    ///
    /// let body = Body::new_static(Vector3::ZERO, Vector3::new(2.0, 1.0, 3.0)).unwrap();
    /// assert_eq!(body.extent_along(Vector3::new(0.0, -1.0, 0.0)), 1.0);
    /// assert_eq!(body.extent_along(Vector3::new(0.0, 0.0, 1.0)), 3.0);
    /// ```
    pub fn extent_along(&self, direction: Vector3) -> f64 {
        let [ax, ay, az] = self.orientation.axes();
        ax.dot(direction).abs() * self.half_extent.x
            + ay.dot(direction).abs() * self.half_extent.y
            + az.dot(direction).abs() * self.half_extent.z
    }
}
