use crate::models::{BodyHandle, Quaternion, Vector3};
use crate::utils::{MISS_DISTANCE, VECTOR_EPSILON};

/// A half-line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    /// Unit direction.
    pub direction: Vector3,
    /// Hits further away than this are ignored.
    pub max_distance: f64,
}

impl Ray {
    /// Creates an unbounded ray; the direction is normalized.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Ray {
            origin,
            direction: direction.normalize(),
            max_distance: f64::INFINITY,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn at(&self, distance: f64) -> Vector3 {
        self.origin + self.direction * distance
    }
}

/// Nearest surface hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f64,
    pub point: Vector3,
    /// World-space normal of the face that was entered, facing the ray origin.
    pub normal: Vector3,
    pub collider: BodyHandle,
}

impl RayHit {
    pub const MISS_DISTANCE: f64 = MISS_DISTANCE;

    /// Distance of an optional hit, using the miss sentinel for `None`.
    ///
    /// # Example
    /// ```
    /// use rs_point_physics::interactions::RayHit;
    ///
    /// assert_eq!(RayHit::distance_of(None), f64::INFINITY);
    /// ```
    pub fn distance_of(hit: Option<&RayHit>) -> f64 {
        hit.map_or(RayHit::MISS_DISTANCE, |hit| hit.distance)
    }
}

/// Oriented box: center, half extents along its local axes, orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vector3,
    pub half_extent: Vector3,
    pub orientation: Quaternion,
}

/// Ray against oriented box, slab method in the box's local frame.
///
/// Returns the entry distance and the world-space normal of the entered face. A ray whose
/// origin lies inside the box reports no hit: only front faces are visible.
///
/// # Example
/// ```
/// use rs_point_physics::interactions::{ray_box, OrientedBox, Ray};
/// use rs_point_physics::models::{Quaternion, Vector3};
///
/// let ground = OrientedBox {
///     center: Vector3::new(0.0, -1.0, 0.0),
///     half_extent: Vector3::new(50.0, 1.0, 50.0),
///     orientation: Quaternion::identity(),
/// };
/// let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
/// let (distance, normal) = ray_box(&ray, &ground).unwrap();
/// assert_eq!(distance, 5.0);
/// assert_eq!(normal, Vector3::UP);
/// ```
pub fn ray_box(ray: &Ray, shape: &OrientedBox) -> Option<(f64, Vector3)> {
    let origin = shape.orientation.inverse_rotate_vector(ray.origin - shape.center);
    let direction = shape.orientation.inverse_rotate_vector(ray.direction);

    let o = [origin.x, origin.y, origin.z];
    let d = [direction.x, direction.y, direction.z];
    let h = [shape.half_extent.x, shape.half_extent.y, shape.half_extent.z];

    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let mut enter_axis = None;

    for axis in 0..3 {
        if d[axis].abs() < VECTOR_EPSILON {
            // parallel to this slab: either always inside it or never
            if o[axis].abs() > h[axis] {
                return None;
            }
            continue;
        }

        let (near, far, face_sign) = if d[axis] > 0.0 {
            ((-h[axis] - o[axis]) / d[axis], (h[axis] - o[axis]) / d[axis], -1.0)
        } else {
            ((h[axis] - o[axis]) / d[axis], (-h[axis] - o[axis]) / d[axis], 1.0)
        };

        if near > t_enter {
            t_enter = near;
            enter_axis = Some((axis, face_sign));
        }
        t_exit = t_exit.min(far);

        if t_enter > t_exit {
            return None;
        }
    }

    let (axis, face_sign) = enter_axis?;
    if t_enter < 0.0 || t_enter > ray.max_distance {
        return None;
    }

    let mut local_normal = Vector3::ZERO;
    match axis {
        0 => local_normal.x = face_sign,
        1 => local_normal.y = face_sign,
        _ => local_normal.z = face_sign,
    }

    Some((t_enter, shape.orientation.rotate_vector(local_normal)))
}
