// src/apis/physics_world.rs

use log::debug;
use crate::dynamics::{step_body, BodyStep};
use crate::errors::PhysicsError;
use crate::interactions::{ColliderProxy, ColliderRegistry, Ray, RayHit};
use crate::models::{Body, BodyHandle, CardinalDirection, ContactRecord, MotionState, Quaternion, Vector3};
use crate::utils::{PhysicsConstants, VECTOR_EPSILON};

/// Summary of one [`PhysicsWorld::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// The time step actually applied, after clamping.
    pub dt: f64,
    /// Bodies that went through integration this tick.
    pub integrated: usize,
    /// Bodies that went to sleep at the end of their step.
    pub fell_asleep: usize,
    /// Timed bodies that expired and were destroyed at the end of the tick.
    pub expired: Vec<BodyHandle>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Handle-based physics world: owns every body and the collider registry, and advances the
/// simulation one tick at a time.
///
/// Rendering code keeps [`BodyHandle`]s next to its meshes and reads positions and
/// orientations back after each tick.
///
/// # Examples
///
/// ```
/// use rs_point_physics::apis::PhysicsWorld;
/// use rs_point_physics::models::{CardinalDirection, Quaternion, Vector3};
/// use rs_point_physics::utils::PhysicsConstants;
///
/// let constants = PhysicsConstants::default().with_gravity(10.0);
/// let mut world = PhysicsWorld::with_constants(constants).unwrap();
/// world.create_static(Vector3::new(0.0, -1.0, 0.0), Vector3::new(50.0, 1.0, 50.0), Quaternion::identity()).unwrap();
/// let crate_box = world.create_body(Vector3::new(0.0, 5.0, 0.0), 1.0, Vector3::ONE).unwrap();
///
/// for _ in 0..1000 {
///     world.tick(0.02).unwrap();
/// }
///
/// assert!(!world.is_in_motion(crate_box).unwrap());
/// assert!((world.position(crate_box).unwrap().y - 1.0).abs() < 0.02);
/// assert!(world.is_grounded(crate_box).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    constants: PhysicsConstants,
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    /// Dynamic bodies in creation order, the fixed order of every tick.
    dynamic_order: Vec<BodyHandle>,
    colliders: ColliderRegistry,
    ticks: u64,
    elapsed: f64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        PhysicsWorld::new()
    }
}

impl PhysicsWorld {

    /// Creates an empty world with the default constants.
    pub fn new() -> Self {
        PhysicsWorld {
            constants: PhysicsConstants::default(),
            slots: Vec::new(),
            free_slots: Vec::new(),
            dynamic_order: Vec::new(),
            colliders: ColliderRegistry::new(),
            ticks: 0,
            elapsed: 0.0,
        }
    }

    /// Creates an empty world with custom constants.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `constants` if any value is out of range.
    pub fn with_constants(constants: PhysicsConstants) -> Result<Self, PhysicsError> {
        constants.validate()?;
        Ok(PhysicsWorld {
            constants,
            ..PhysicsWorld::new()
        })
    }

    /// The constants used by the next tick.
    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    /// Replaces the constants between ticks without touching any body state.
    ///
    /// # Arguments
    ///
    /// * `constants` - The new tunables, typically edited live from a control panel.
    ///
    /// # Errors
    ///
    /// Invalid constants are rejected and the previous ones stay active.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_point_physics::apis::PhysicsWorld;
    ///
    /// let mut world = PhysicsWorld::new();
    /// let low_gravity = world.constants().with_gravity(1.62);
    /// world.set_constants(low_gravity).unwrap();
    /// assert_eq!(world.constants().gravity, 1.62);
    ///
    /// assert!(world.set_constants(low_gravity.with_restitution(2.0)).is_err());
    /// assert_eq!(world.constants().restitution, low_gravity.restitution);
    /// ```
    pub fn set_constants(&mut self, constants: PhysicsConstants) -> Result<(), PhysicsError> {
        constants.validate()?;
        self.constants = constants;
        Ok(())
    }

    fn insert(&mut self, body: Body) -> BodyHandle {
        let handle = match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                BodyHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, body: Some(body) });
                BodyHandle::new(index, 0)
            }
        };

        if let Some(body) = self.slots[handle.index as usize].body.as_ref() {
            self.colliders.insert(ColliderProxy::from_body(handle, body));
            if body.is_dynamic() {
                self.dynamic_order.push(handle);
            }
            debug!("Created body {} at {:?} (mass {})", handle, body.position, body.mass());
        }
        handle
    }

    /// Read access to a body.
    ///
    /// # Errors
    ///
    /// `UnknownBody` if the handle was never issued or its body has been destroyed.
    pub fn body(&self, handle: BodyHandle) -> Result<&Body, PhysicsError> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, PhysicsError> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_mut())
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn dynamic_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, PhysicsError> {
        let body = self.body_mut(handle)?;
        if !body.is_dynamic() {
            return Err(PhysicsError::StaticBody(handle));
        }
        Ok(body)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_ok()
    }

    /// Creates a dynamic body at rest; it starts falling on the next tick.
    ///
    /// # Arguments
    ///
    /// * `position` - Initial world-space center of the body.
    /// * `mass` - Mass in kilograms, strictly positive.
    /// * `half_extent` - Half-size of the bounding box along each local axis.
    ///
    /// # Returns
    ///
    /// * `Ok(BodyHandle)` - Handle of the new body.
    /// * `Err(PhysicsError::InvalidMass)` - If the mass is zero, negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_point_physics::apis::PhysicsWorld;
    /// use rs_point_physics::errors::PhysicsError;
    /// use rs_point_physics::models::Vector3;
    ///
    /// let mut world = PhysicsWorld::new();
    /// let handle = world.create_body(Vector3::new(0.0, 5.0, 0.0), 1.0, Vector3::ONE).unwrap();
    /// assert_eq!(world.position(handle).unwrap(), Vector3::new(0.0, 5.0, 0.0));
    ///
    /// let rejected = world.create_body(Vector3::ZERO, 0.0, Vector3::ONE);
    /// assert_eq!(rejected, Err(PhysicsError::InvalidMass(0.0)));
    /// ```
    pub fn create_body(&mut self, position: Vector3, mass: f64, half_extent: Vector3) -> Result<BodyHandle, PhysicsError> {
        let body = Body::new_dynamic(position, mass, half_extent)?;
        Ok(self.insert(body))
    }

    /// Creates a static collider (terrain, walls, ramps). Static colliders are probed but
    /// never integrated.
    pub fn create_static(&mut self, position: Vector3, half_extent: Vector3, orientation: Quaternion) -> Result<BodyHandle, PhysicsError> {
        if !orientation.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let body = Body::new_static(position, half_extent)?.with_orientation(orientation);
        Ok(self.insert(body))
    }

    /// Creates a timed dynamic body, such as a thrown projectile.
    ///
    /// The body is destroyed at the end of the tick in which its lifetime runs out, and its
    /// handle is listed in that tick's [`StepReport::expired`].
    ///
    /// # Errors
    ///
    /// `InvalidTime` for a lifetime that is not strictly positive, plus the errors of
    /// [`PhysicsWorld::create_body`].
    pub fn spawn_projectile(
        &mut self,
        position: Vector3,
        mass: f64,
        half_extent: Vector3,
        velocity: Vector3,
        lifetime: f64,
    ) -> Result<BodyHandle, PhysicsError> {
        if !lifetime.is_finite() || lifetime <= 0.0 {
            return Err(PhysicsError::InvalidTime(lifetime));
        }
        if !velocity.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let mut body = Body::new_dynamic(position, mass, half_extent)?;
        body.velocity = velocity;
        body.lifetime = Some(lifetime);
        Ok(self.insert(body))
    }

    /// Removes a body from the world, its collider from the registry and, for dynamic bodies,
    /// from the tick order. Resting bodies that were supported by it wake up.
    ///
    /// # Returns
    ///
    /// The removed body. The handle is invalid afterwards, even once its slot is reused.
    pub fn destroy_body(&mut self, handle: BodyHandle) -> Result<Body, PhysicsError> {
        self.body(handle)?;

        let slot = &mut self.slots[handle.index as usize];
        let body = slot.body.take().ok_or(PhysicsError::UnknownBody(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(handle.index);

        self.colliders.remove(handle);
        self.dynamic_order.retain(|&other| other != handle);
        self.wake_dependents(handle);

        debug!("Destroyed body {}", handle);
        Ok(body)
    }

    /// Wakes every resting body whose contacts reference `collider`.
    fn wake_dependents(&mut self, collider: BodyHandle) {
        for slot in &mut self.slots {
            if let Some(body) = slot.body.as_mut() {
                if body.state == MotionState::Resting && body.contacts.references(collider) {
                    body.wake();
                }
            }
        }
    }

    fn sync_collider(&mut self, handle: BodyHandle) {
        if let Some(body) = self.slots.get(handle.index as usize).and_then(|slot| slot.body.as_ref()) {
            self.colliders.update(handle, body.position, body.orientation);
        }
    }

    /// Queues a world-space force for the next tick. A non-zero force wakes a resting body.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_point_physics::apis::PhysicsWorld;
    /// use rs_point_physics::models::Vector3;
    ///
    /// let mut world = PhysicsWorld::new();
    /// let ball = world.create_body(Vector3::new(0.0, 10.0, 0.0), 2.0, Vector3::splat(0.5)).unwrap();
    /// world.add_force(ball, Vector3::new(40.0, 0.0, 0.0)).unwrap();
    /// world.tick(0.02).unwrap();
    ///
    /// assert!(world.velocity(ball).unwrap().x > 0.0);
    /// ```
    pub fn add_force(&mut self, handle: BodyHandle, force: Vector3) -> Result<(), PhysicsError> {
        if !force.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        self.dynamic_body_mut(handle)?.add_force(force);
        Ok(())
    }

    /// Queues a force expressed relative to the body's heading: the horizontal (X/Z) part is
    /// rotated by the body's orientation, the vertical part is kept as given.
    pub fn add_local_force(&mut self, handle: BodyHandle, force: Vector3) -> Result<(), PhysicsError> {
        if !force.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let body = self.dynamic_body_mut(handle)?;
        let horizontal = body.orientation.rotate_vector(Vector3::new(force.x, 0.0, force.z));
        body.add_force(Vector3::new(horizontal.x, force.y, horizontal.z));
        Ok(())
    }

    /// Overwrites the velocity of a dynamic body, e.g. for a jump. A non-zero velocity wakes it.
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vector3) -> Result<(), PhysicsError> {
        if !velocity.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let body = self.dynamic_body_mut(handle)?;
        body.velocity = velocity;
        if !velocity.is_zero() {
            body.wake();
        }
        Ok(())
    }

    pub fn velocity(&self, handle: BodyHandle) -> Result<Vector3, PhysicsError> {
        Ok(self.body(handle)?.velocity)
    }

    pub fn acceleration(&self, handle: BodyHandle) -> Result<Vector3, PhysicsError> {
        Ok(self.body(handle)?.acceleration)
    }

    /// Force queued for the next tick.
    pub fn force(&self, handle: BodyHandle) -> Result<Vector3, PhysicsError> {
        Ok(self.body(handle)?.force)
    }

    pub fn position(&self, handle: BodyHandle) -> Result<Vector3, PhysicsError> {
        Ok(self.body(handle)?.position)
    }

    /// Teleports a body. Dynamic bodies wake up, and so do resting bodies that were in contact
    /// with it. The collider moves immediately.
    pub fn set_position(&mut self, handle: BodyHandle, position: Vector3) -> Result<(), PhysicsError> {
        if !position.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let body = self.body_mut(handle)?;
        body.position = position;
        body.wake();

        self.sync_collider(handle);
        self.wake_dependents(handle);
        Ok(())
    }

    pub fn orientation(&self, handle: BodyHandle) -> Result<Quaternion, PhysicsError> {
        Ok(self.body(handle)?.orientation)
    }

    /// Sets the orientation of a body. Like a teleport, this wakes the body and its dependents.
    pub fn set_orientation(&mut self, handle: BodyHandle, orientation: Quaternion) -> Result<(), PhysicsError> {
        if !orientation.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let body = self.body_mut(handle)?;
        body.orientation = orientation.normalized();
        body.wake();

        self.sync_collider(handle);
        self.wake_dependents(handle);
        Ok(())
    }

    /// Turns a body around the world Y axis by `angle` radians.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_point_physics::apis::PhysicsWorld;
    /// use rs_point_physics::models::Vector3;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let mut world = PhysicsWorld::new();
    /// let player = world.create_body(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    /// world.rotate_yaw(player, FRAC_PI_2).unwrap();
    ///
    /// let heading = world.orientation(player).unwrap().rotate_vector(Vector3::new(0.0, 0.0, 1.0));
    /// assert!((heading.x - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotate_yaw(&mut self, handle: BodyHandle, angle: f64) -> Result<(), PhysicsError> {
        if !angle.is_finite() {
            return Err(PhysicsError::InvalidVector);
        }
        let current = self.body(handle)?.orientation;
        self.set_orientation(handle, Quaternion::from_yaw(angle) * current)
    }

    /// Direction → normal pairs of the body's current contacts, in resolution order.
    pub fn contacts(&self, handle: BodyHandle) -> Result<Vec<(CardinalDirection, Vector3)>, PhysicsError> {
        Ok(self.body(handle)?.contacts.normals())
    }

    /// The full contact record along one direction, if any.
    pub fn contact(&self, handle: BodyHandle, direction: CardinalDirection) -> Result<Option<ContactRecord>, PhysicsError> {
        Ok(self.body(handle)?.contacts.get(direction).copied())
    }

    /// True when the body stands on something: the downward contact slot holds a surface
    /// facing upwards.
    pub fn is_grounded(&self, handle: BodyHandle) -> Result<bool, PhysicsError> {
        Ok(self
            .body(handle)?
            .contacts
            .get(CardinalDirection::Down)
            .map_or(false, |contact| contact.normal.y > 0.0))
    }

    pub fn is_in_motion(&self, handle: BodyHandle) -> Result<bool, PhysicsError> {
        Ok(self.body(handle)?.is_in_motion())
    }

    pub fn mass(&self, handle: BodyHandle) -> Result<f64, PhysicsError> {
        Ok(self.body(handle)?.mass())
    }

    pub fn half_extent(&self, handle: BodyHandle) -> Result<Vector3, PhysicsError> {
        Ok(self.body(handle)?.half_extent)
    }

    /// Hides a body from every probe (decorative attachments) or makes it solid again.
    pub fn set_collision_enabled(&mut self, handle: BodyHandle, enabled: bool) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.collision_enabled = enabled;
        self.colliders.set_enabled(handle, enabled);
        if !enabled {
            self.wake_dependents(handle);
        }
        Ok(())
    }

    /// Distance between the centers of two bodies.
    pub fn distance_between(&self, a: BodyHandle, b: BodyHandle) -> Result<f64, PhysicsError> {
        Ok(self.body(a)?.position.distance_to(self.body(b)?.position))
    }

    /// Unit vector from the center of `a` towards the center of `b`; zero when they coincide.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_point_physics::apis::PhysicsWorld;
    /// use rs_point_physics::models::Vector3;
    ///
    /// let mut world = PhysicsWorld::new();
    /// let enemy = world.create_body(Vector3::new(0.0, 0.0, 0.0), 1.0, Vector3::ONE).unwrap();
    /// let player = world.create_body(Vector3::new(3.0, 0.0, 4.0), 1.0, Vector3::ONE).unwrap();
    ///
    /// assert_eq!(world.distance_between(enemy, player).unwrap(), 5.0);
    /// let chase = world.direction_between(enemy, player).unwrap();
    /// assert!((chase.x - 0.6).abs() < 1e-12 && (chase.z - 0.8).abs() < 1e-12);
    /// ```
    pub fn direction_between(&self, a: BodyHandle, b: BodyHandle) -> Result<Vector3, PhysicsError> {
        Ok(self.body(a)?.position.direction_to(self.body(b)?.position))
    }

    /// Nearest collider hit by a ray, as seen by the probes of the next tick.
    pub fn raycast(&self, origin: Vector3, direction: Vector3, exclude: Option<BodyHandle>) -> Option<RayHit> {
        self.colliders.raycast(&Ray::new(origin, direction), exclude)
    }

    /// Number of live bodies, static colliders included.
    pub fn body_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.body.is_some()).count()
    }

    /// Dynamic bodies in the fixed order in which they are stepped.
    pub fn dynamic_bodies(&self) -> &[BodyHandle] {
        &self.dynamic_order
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Simulated time, the sum of every applied (clamped) time step.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    /// Advances the simulation by `delta_time`, clamped to `max_time_step`.
    ///
    /// Every active dynamic body, in creation order, gets gravity, a six-direction probe,
    /// contact resolution, integration and the sleep check. Probes see colliders where they
    /// were at the end of the previous tick; collider poses are refreshed, supports that moved
    /// wake their dependents and expired projectiles are destroyed once all bodies are done.
    ///
    /// # Arguments
    ///
    /// * `delta_time` - Frame time in seconds. Zero is a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(StepReport)` - What the tick did.
    /// * `Err(PhysicsError::InvalidTime)` - For a negative or non-finite `delta_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_point_physics::apis::PhysicsWorld;
    /// use rs_point_physics::models::Vector3;
    ///
    /// let mut world = PhysicsWorld::new();
    /// world.create_body(Vector3::new(0.0, 5.0, 0.0), 1.0, Vector3::ONE).unwrap();
    ///
    /// let report = world.tick(0.25).unwrap();
    /// assert_eq!(report.dt, 0.02);
    /// assert_eq!(report.integrated, 1);
    /// assert!(world.tick(-1.0).is_err());
    /// ```
    pub fn tick(&mut self, delta_time: f64) -> Result<StepReport, PhysicsError> {
        let dt = self.constants.clamp_time_step(delta_time)?;
        if dt < delta_time {
            debug!("Time step {} clamped to {}", delta_time, dt);
        }

        let mut report = StepReport { dt, ..StepReport::default() };
        if dt == 0.0 {
            return Ok(report);
        }

        let constants = self.constants;
        let mut moved = Vec::new();

        for &handle in &self.dynamic_order {
            let Some(body) = self.slots[handle.index as usize].body.as_mut() else {
                continue;
            };

            let before = body.position;
            match step_body(handle, body, &self.colliders, &constants, dt) {
                BodyStep::Skipped => {}
                BodyStep::Integrated => report.integrated += 1,
                BodyStep::FellAsleep => {
                    report.integrated += 1;
                    report.fell_asleep += 1;
                }
            }
            if (body.position - before).length() > VECTOR_EPSILON {
                moved.push(handle);
            }

            if let Some(remaining) = body.lifetime.as_mut() {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    report.expired.push(handle);
                }
            }
        }

        for &handle in &moved {
            self.sync_collider(handle);
        }
        for &handle in &moved {
            self.wake_dependents(handle);
        }
        for &handle in &report.expired {
            debug!("Body {} expired", handle);
            self.destroy_body(handle)?;
        }

        self.ticks += 1;
        self.elapsed += dt;
        Ok(report)
    }
}
