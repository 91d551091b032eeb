use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use approx::{AbsDiffEq, RelativeEq};
use crate::utils::{clamp, sign, VECTOR_EPSILON};

pub trait FromCoordinates <T> {
    /// Creates a new instance of the struct from the given coordinates.
    /// # Example
    /// ```
    /// use rs_point_physics::models::{FromCoordinates, Vector3};
    ///
    /// let v = Vector3::from_coord((1.0, 2.0, 3.0));
    /// assert_eq!(v.y, 2.0);
    /// ```
    fn from_coord(position: T) -> Self;
}

pub trait ToCoordinates <T> {
    /// Converts the struct to a tuple of coordinates.
    fn to_coord(&self) -> T;
}

/// A 3D vector of `f64` components. Value type: every operation returns a new vector
/// unless it is one of the `*Assign` operators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vector3 = Vector3 { x: 1.0, y: 1.0, z: 1.0 };
    pub const UP: Vector3 = Vector3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const DOWN: Vector3 = Vector3 { x: 0.0, y: -1.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    pub const fn splat(value: f64) -> Self {
        Vector3 { x: value, y: value, z: value }
    }

    #[inline]
    pub fn dot(&self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::Vector3;
    ///
    /// let z = Vector3::new(1.0, 0.0, 0.0).cross(Vector3::new(0.0, 1.0, 0.0));
    /// assert_eq!(z, Vector3::new(0.0, 0.0, 1.0));
    /// ```
    #[inline]
    pub fn cross(&self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A (near) zero-length vector normalizes to [`Vector3::ZERO`] instead of producing NaN.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::Vector3;
    ///
    /// let n = Vector3::new(3.0, 0.0, 4.0).normalize();
    /// assert!((n.x - 0.6).abs() < 1e-12);
    /// assert!((n.z - 0.8).abs() < 1e-12);
    /// assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
    /// ```
    pub fn normalize(&self) -> Vector3 {
        let length = self.length();
        if length < VECTOR_EPSILON || !length.is_finite() {
            return Vector3::ZERO;
        }
        *self / length
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Vector3 {
        *self * factor
    }

    pub fn min(&self, other: Vector3) -> Vector3 {
        Vector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: Vector3) -> Vector3 {
        Vector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn abs(&self) -> Vector3 {
        Vector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Per-axis sign; zero components stay zero.
    pub fn sign(&self) -> Vector3 {
        Vector3::new(sign(self.x), sign(self.y), sign(self.z))
    }

    /// Clamps every component into `[min, max]`.
    pub fn clamp(&self, min: f64, max: f64) -> Vector3 {
        Vector3::new(clamp(self.x, min, max), clamp(self.y, min, max), clamp(self.z, min, max))
    }

    /// Component of `self` along the unit vector `normal`.
    #[inline]
    pub fn project_onto(&self, normal: Vector3) -> Vector3 {
        normal * self.dot(normal)
    }

    /// What is left of `self` once its component along the unit vector `normal` is removed.
    #[inline]
    pub fn reject_from(&self, normal: Vector3) -> Vector3 {
        *self - self.project_onto(normal)
    }

    /// Reflection about the plane with unit normal `normal`: `v - 2(v·n)n`.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::models::Vector3;
    ///
    /// let bounced = Vector3::new(1.0, -2.0, 0.0).reflect(Vector3::UP);
    /// assert_eq!(bounced, Vector3::new(1.0, 2.0, 0.0));
    /// ```
    pub fn reflect(&self, normal: Vector3) -> Vector3 {
        *self - normal * (2.0 * self.dot(normal))
    }

    pub fn distance_to(&self, other: Vector3) -> f64 {
        (other - *self).length()
    }

    /// Unit vector pointing from `self` towards `other` (zero if they coincide).
    pub fn direction_to(&self, other: Vector3) -> Vector3 {
        (other - *self).normalize()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl FromCoordinates<(f64, f64, f64)> for Vector3 {
    fn from_coord(position: (f64, f64, f64)) -> Self {
        Vector3::new(position.0, position.1, position.2)
    }
}

impl ToCoordinates<(f64, f64, f64)> for Vector3 {
    fn to_coord(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from(value: (f64, f64, f64)) -> Self {
        Vector3::from_coord(value)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(value: [f64; 3]) -> Self {
        Vector3::new(value[0], value[1], value[2])
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
