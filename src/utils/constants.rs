use crate::utils;

pub const DEFAULT_PHYSICS_CONSTANTS: utils::PhysicsConstants = utils::PhysicsConstants {
    gravity: 9.80665,
    air_resistance: 0.001,
    friction: 0.4,
    restitution: 0.85,
    contact_epsilon: 0.01,
    max_time_step: 0.02,
    impact_velocity_threshold: 0.5,
    sleep_velocity_threshold: 0.05,
    sleep_force_threshold: 0.05,
    max_speed: 25.0,
};

/// Distance reported to collaborators for a ray that hit nothing.
pub const MISS_DISTANCE: f64 = f64::INFINITY;

/// Below this magnitude a vector is treated as zero length.
pub const VECTOR_EPSILON: f64 = 1e-12;
