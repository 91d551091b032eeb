use std::fmt;
use std::error::Error;
use crate::models::BodyHandle;

/// Represents errors that can occur while configuring or driving the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass for a dynamic body (zero, negative or not finite).
    InvalidMass(f64),
    /// Indicates a half-extent with a negative or non-finite component.
    InvalidExtent,
    /// Indicates an invalid time value (negative or not finite).
    InvalidTime(f64),
    /// Indicates a tunable constant outside of its accepted range.
    InvalidCoefficient { name: &'static str, value: f64 },
    /// Indicates a non-finite vector argument (position, force, velocity).
    InvalidVector,
    /// The handle does not refer to a live body.
    UnknownBody(BodyHandle),
    /// The operation requires a dynamic body but the handle refers to a static collider.
    StaticBody(BodyHandle),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass(mass) => write!(f, "Invalid mass value: {}", mass),
            PhysicsError::InvalidExtent => write!(f, "Invalid half-extent"),
            PhysicsError::InvalidTime(dt) => write!(f, "Invalid time value: {}", dt),
            PhysicsError::InvalidCoefficient { name, value } => {
                write!(f, "Invalid coefficient value for {}: {}", name, value)
            }
            PhysicsError::InvalidVector => write!(f, "Vector components must be finite"),
            PhysicsError::UnknownBody(handle) => write!(f, "Unknown body {}", handle),
            PhysicsError::StaticBody(handle) => {
                write!(f, "Body {} is a static collider and cannot be moved by forces", handle)
            }
        }
    }
}

impl Error for PhysicsError {}
