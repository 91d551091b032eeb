use std::ops::Mul;
use crate::models::Vector3;

/// Unit quaternion describing a body or collider orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation)
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn is_near_identity(&self, epsilon: f64) -> bool {
        (self.w.abs() - 1.0).abs() < epsilon &&
            self.x.abs() < epsilon &&
            self.y.abs() < epsilon &&
            self.z.abs() < epsilon
    }

    /// Creates a quaternion rotating by `angle` radians around `axis`.
    /// A zero axis yields the identity.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::{Quaternion, Vector3};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let q = Quaternion::from_axis_angle(Vector3::UP, FRAC_PI_2);
    /// let v = q.rotate_vector(Vector3::new(1.0, 0.0, 0.0));
    /// assert!((v.z - -1.0).abs() < 1e-12);
    /// ```
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let axis = axis.normalize();
        if axis.is_zero() {
            return Quaternion::identity();
        }

        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();

        Quaternion {
            w: half_angle.cos(),
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
        }
    }

    /// Rotation about the world Y axis, the "turn" of a character.
    pub fn from_yaw(angle: f64) -> Self {
        Quaternion::from_axis_angle(Vector3::UP, angle)
    }

    /// Creates a quaternion from Euler angles applied in X, then Y, then Z order
    /// (the convention of scene-graph `rotation.set(x, y, z)` calls).
    pub fn from_euler_xyz(x: f64, y: f64, z: f64) -> Self {
        let qx = Quaternion::from_axis_angle(Vector3::new(1.0, 0.0, 0.0), x);
        let qy = Quaternion::from_axis_angle(Vector3::UP, y);
        let qz = Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), z);
        qx * qy * qz
    }

    /// Returns the length/magnitude of the quaternion
    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 || !mag.is_finite() {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Hamilton product, `self` applied after `other`.
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotates a vector from local space into world space.
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let q = self.normalized();
        let u = Vector3::new(q.x, q.y, q.z);
        // v' = v + 2w(u × v) + 2u × (u × v)
        let t = u.cross(v) * 2.0;
        v + t * q.w + u.cross(t)
    }

    /// Rotates a world-space vector back into the local frame.
    pub fn inverse_rotate_vector(&self, v: Vector3) -> Vector3 {
        self.normalized().conjugate().rotate_vector(v)
    }

    /// The three local axes expressed in world space.
    pub fn axes(&self) -> [Vector3; 3] {
        [
            self.rotate_vector(Vector3::new(1.0, 0.0, 0.0)),
            self.rotate_vector(Vector3::UP),
            self.rotate_vector(Vector3::new(0.0, 0.0, 1.0)),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(&rhs)
    }
}
