// src/utils/constants_config.rs
use log::warn;
use crate::errors::PhysicsError;
use crate::models::Vector3;
use crate::utils::DEFAULT_PHYSICS_CONSTANTS;

/// Tunable parameters of the simulation.
///
/// The struct is `Copy` so a control surface can hand a fresh value to
/// [`PhysicsWorld::set_constants`](crate::apis::PhysicsWorld::set_constants) at any time;
/// swapping constants never touches body state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    /// Gravitational acceleration magnitude, acting along world -Y.
    pub gravity: f64,
    /// Fraction of velocity removed every tick, in `[0, 1)`.
    pub air_resistance: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Fraction of the normal speed kept after an impact, in `[0, 1]`.
    pub restitution: f64,
    /// Gap tolerance used by the collision probe.
    pub contact_epsilon: f64,
    /// Upper bound for a single integration step.
    pub max_time_step: f64,
    /// Approach speed above which a contact is resolved as an impact.
    pub impact_velocity_threshold: f64,
    pub sleep_velocity_threshold: f64,
    pub sleep_force_threshold: f64,
    /// Per-axis cap on horizontal velocity. `f64::INFINITY` disables it.
    pub max_speed: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        DEFAULT_PHYSICS_CONSTANTS
    }
}

impl PhysicsConstants {
    /// Builds a set of constants, using the defaults for every `None`.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::utils::{PhysicsConstants, DEFAULT_PHYSICS_CONSTANTS};
    ///
    /// let constants = PhysicsConstants::new(Some(10.0), None, Some(0.2), None, None, None);
    /// assert_eq!(constants.gravity, 10.0);
    /// assert_eq!(constants.friction, 0.2);
    /// assert_eq!(constants.restitution, DEFAULT_PHYSICS_CONSTANTS.restitution);
    /// ```
    pub fn new(
        gravity: Option<f64>,
        air_resistance: Option<f64>,
        friction: Option<f64>,
        restitution: Option<f64>,
        contact_epsilon: Option<f64>,
        max_time_step: Option<f64>,
    ) -> Self {
        let default = DEFAULT_PHYSICS_CONSTANTS;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            air_resistance: air_resistance.unwrap_or(default.air_resistance),
            friction: friction.unwrap_or(default.friction),
            restitution: restitution.unwrap_or(default.restitution),
            contact_epsilon: contact_epsilon.unwrap_or(default.contact_epsilon),
            max_time_step: max_time_step.unwrap_or(default.max_time_step),
            ..default
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_air_resistance(mut self, air_resistance: f64) -> Self {
        self.air_resistance = air_resistance;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_contact_epsilon(mut self, contact_epsilon: f64) -> Self {
        self.contact_epsilon = contact_epsilon;
        self
    }

    pub fn with_max_time_step(mut self, max_time_step: f64) -> Self {
        self.max_time_step = max_time_step;
        self
    }

    pub fn with_impact_velocity_threshold(mut self, threshold: f64) -> Self {
        self.impact_velocity_threshold = threshold;
        self
    }

    pub fn with_sleep_thresholds(mut self, velocity: f64, force: f64) -> Self {
        self.sleep_velocity_threshold = velocity;
        self.sleep_force_threshold = force;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    /// `InvalidTime` for a non-positive `max_time_step`, `InvalidCoefficient` for anything else.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.max_time_step.is_finite() && self.max_time_step > 0.0) {
            return Err(PhysicsError::InvalidTime(self.max_time_step));
        }

        let checks: [(&'static str, f64, bool); 9] = [
            ("gravity", self.gravity, self.gravity.is_finite() && self.gravity >= 0.0),
            ("air_resistance", self.air_resistance, (0.0..1.0).contains(&self.air_resistance)),
            ("friction", self.friction, self.friction.is_finite() && self.friction >= 0.0),
            ("restitution", self.restitution, (0.0..=1.0).contains(&self.restitution)),
            ("contact_epsilon", self.contact_epsilon, self.contact_epsilon.is_finite() && self.contact_epsilon > 0.0),
            ("impact_velocity_threshold", self.impact_velocity_threshold,
                self.impact_velocity_threshold.is_finite() && self.impact_velocity_threshold >= 0.0),
            ("sleep_velocity_threshold", self.sleep_velocity_threshold,
                self.sleep_velocity_threshold.is_finite() && self.sleep_velocity_threshold >= 0.0),
            ("sleep_force_threshold", self.sleep_force_threshold,
                self.sleep_force_threshold.is_finite() && self.sleep_force_threshold >= 0.0),
            ("max_speed", self.max_speed, !self.max_speed.is_nan() && self.max_speed > 0.0),
        ];

        for (name, value, ok) in checks {
            if !ok {
                warn!("Rejecting physics constant {} = {}", name, value);
                return Err(PhysicsError::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }

    /// Clamps a frame delta into `[0, max_time_step]`.
    ///
    /// # Errors
    /// Returns `InvalidTime` for a negative or non-finite delta.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::utils::PhysicsConstants;
    ///
    /// let constants = PhysicsConstants::default().with_max_time_step(0.02);
    /// assert_eq!(constants.clamp_time_step(0.5).unwrap(), 0.02);
    /// assert_eq!(constants.clamp_time_step(0.01).unwrap(), 0.01);
    /// assert!(constants.clamp_time_step(-1.0).is_err());
    /// ```
    pub fn clamp_time_step(&self, dt: f64) -> Result<f64, PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTime(dt));
        }
        Ok(dt.min(self.max_time_step))
    }

    /// Gravity force acting on a body of the given mass.
    pub fn gravity_force(&self, mass: f64) -> Vector3 {
        Vector3::new(0.0, -self.gravity * mass, 0.0)
    }
}
