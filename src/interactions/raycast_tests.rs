use approx::assert_relative_eq;
use crate::assert_float_eq;
use crate::interactions::{ray_box, OrientedBox, Ray, RayHit};
use crate::models::{BodyHandle, Quaternion, Vector3};

fn ground() -> OrientedBox {
    OrientedBox {
        center: Vector3::new(0.0, -1.0, 0.0),
        half_extent: Vector3::new(50.0, 1.0, 50.0),
        orientation: Quaternion::identity(),
    }
}

#[test]
fn test_ray_hits_top_face_from_above() {
    let ray = Ray::new(Vector3::new(3.0, 4.0, -2.0), Vector3::new(0.0, -1.0, 0.0));
    let (distance, normal) = ray_box(&ray, &ground()).expect("ray should hit the ground");

    assert_float_eq(distance, 4.0, 1e-12, Some("distance to the top face"));
    assert_eq!(normal, Vector3::UP);
    assert_relative_eq!(ray.at(distance), Vector3::new(3.0, 0.0, -2.0), epsilon = 1e-12);
}

#[test]
fn test_ray_hits_side_face() {
    let wall = OrientedBox {
        center: Vector3::new(10.0, 0.0, 0.0),
        half_extent: Vector3::new(1.0, 5.0, 5.0),
        orientation: Quaternion::identity(),
    };
    let ray = Ray::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0));
    let (distance, normal) = ray_box(&ray, &wall).unwrap();

    assert_float_eq(distance, 9.0, 1e-12, None);
    assert_eq!(normal, Vector3::new(-1.0, 0.0, 0.0));
}

#[test]
fn test_ray_misses_parallel_outside_slab() {
    let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    assert!(ray_box(&ray, &ground()).is_none());
}

#[test]
fn test_ray_pointing_away_misses() {
    let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::UP);
    assert!(ray_box(&ray, &ground()).is_none());
}

#[test]
fn test_ray_from_inside_reports_no_hit() {
    let ray = Ray::new(Vector3::new(0.0, -1.0, 0.0), Vector3::DOWN);
    assert!(ray_box(&ray, &ground()).is_none());
}

#[test]
fn test_ray_starting_on_surface_hits_at_zero() {
    let ray = Ray::new(Vector3::ZERO, Vector3::DOWN);
    let (distance, normal) = ray_box(&ray, &ground()).unwrap();

    assert_eq!(distance, 0.0);
    assert_eq!(normal, Vector3::UP);
}

#[test]
fn test_ray_respects_max_distance() {
    let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::DOWN).with_max_distance(2.0);
    assert!(ray_box(&ray, &ground()).is_none());

    let ray = ray.with_max_distance(5.0);
    assert!(ray_box(&ray, &ground()).is_some());
}

#[test]
fn test_tilted_box_reports_rotated_normal() {
    let angle = 30f64.to_radians();
    let ramp = OrientedBox {
        center: Vector3::ZERO,
        half_extent: Vector3::new(5.0, 1.0, 5.0),
        orientation: Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), angle),
    };
    let ray = Ray::new(Vector3::new(0.0, 10.0, 0.0), Vector3::DOWN);
    let (distance, normal) = ray_box(&ray, &ramp).unwrap();

    assert_relative_eq!(normal, Vector3::new(-angle.sin(), angle.cos(), 0.0), epsilon = 1e-12);
    assert_float_eq(distance, 10.0 - 1.0 / angle.cos(), 1e-9, Some("distance to the tilted face"));
}

#[test]
fn test_ray_direction_is_normalized() {
    let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -7.0));
    assert_eq!(ray.direction, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn test_miss_distance_sentinel() {
    let hit = RayHit {
        distance: 2.5,
        point: Vector3::ZERO,
        normal: Vector3::UP,
        collider: BodyHandle::new(1, 0),
    };

    assert_eq!(RayHit::distance_of(Some(&hit)), 2.5);
    assert!(RayHit::distance_of(None).is_infinite());
}
