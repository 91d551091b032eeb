use crate::assert_float_eq;
use crate::interactions::{ColliderProxy, ColliderRegistry, OrientedBox, Ray};
use crate::models::{Body, BodyHandle, Quaternion, Vector3};

fn cube(handle: BodyHandle, center: Vector3) -> ColliderProxy {
    ColliderProxy {
        handle,
        shape: OrientedBox {
            center,
            half_extent: Vector3::ONE,
            orientation: Quaternion::identity(),
        },
        enabled: true,
    }
}

#[test]
fn test_insert_replace_and_remove() {
    let mut registry = ColliderRegistry::new();
    let a = BodyHandle::new(0, 0);

    registry.insert(cube(a, Vector3::ZERO));
    registry.insert(cube(a, Vector3::new(0.0, 3.0, 0.0)));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(a).unwrap().shape.center, Vector3::new(0.0, 3.0, 0.0));

    assert!(registry.remove(a).is_some());
    assert!(registry.remove(a).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_proxy_from_body_copies_pose() {
    let body = Body::new_static(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0))
        .unwrap()
        .with_orientation(Quaternion::from_yaw(1.0));
    let proxy = ColliderProxy::from_body(BodyHandle::new(7, 2), &body);

    assert_eq!(proxy.shape.center, body.position);
    assert_eq!(proxy.shape.half_extent, body.half_extent);
    assert_eq!(proxy.shape.orientation, body.orientation);
    assert!(proxy.enabled);
}

#[test]
fn test_raycast_returns_nearest_collider() {
    let mut registry = ColliderRegistry::new();
    let far = BodyHandle::new(0, 0);
    let near = BodyHandle::new(1, 0);
    registry.insert(cube(far, Vector3::new(0.0, -10.0, 0.0)));
    registry.insert(cube(near, Vector3::new(0.0, -4.0, 0.0)));

    let hit = registry.raycast(&Ray::new(Vector3::ZERO, Vector3::DOWN), None).unwrap();
    assert_eq!(hit.collider, near);
    assert_float_eq(hit.distance, 3.0, 1e-12, None);
    assert_eq!(hit.normal, Vector3::UP);
    assert_eq!(hit.point, Vector3::new(0.0, -3.0, 0.0));
}

#[test]
fn test_raycast_never_reports_excluded_body() {
    let mut registry = ColliderRegistry::new();
    let me = BodyHandle::new(0, 0);
    let floor = BodyHandle::new(1, 0);
    // the querying body's own box sits around the ray origin and right below it
    registry.insert(cube(me, Vector3::new(0.0, -1.5, 0.0)));
    registry.insert(cube(floor, Vector3::new(0.0, -5.0, 0.0)));

    let ray = Ray::new(Vector3::ZERO, Vector3::DOWN);
    assert_eq!(registry.raycast(&ray, None).unwrap().collider, me);
    assert_eq!(registry.raycast(&ray, Some(me)).unwrap().collider, floor);
}

#[test]
fn test_disabled_colliders_are_invisible() {
    let mut registry = ColliderRegistry::new();
    let decoration = BodyHandle::new(0, 0);
    registry.insert(cube(decoration, Vector3::new(0.0, -3.0, 0.0)));

    let ray = Ray::new(Vector3::ZERO, Vector3::DOWN);
    assert!(registry.set_enabled(decoration, false));
    assert!(registry.raycast(&ray, None).is_none());

    assert!(registry.set_enabled(decoration, true));
    assert!(registry.raycast(&ray, None).is_some());
    assert!(!registry.set_enabled(BodyHandle::new(9, 0), true));
}

#[test]
fn test_update_moves_proxy() {
    let mut registry = ColliderRegistry::new();
    let crate_box = BodyHandle::new(0, 0);
    registry.insert(cube(crate_box, Vector3::new(0.0, -3.0, 0.0)));

    assert!(registry.update(crate_box, Vector3::new(0.0, -6.0, 0.0), Quaternion::identity()));
    let hit = registry.raycast(&Ray::new(Vector3::ZERO, Vector3::DOWN), None).unwrap();
    assert_float_eq(hit.distance, 5.0, 1e-12, None);

    assert!(!registry.update(BodyHandle::new(3, 1), Vector3::ZERO, Quaternion::identity()));
}

#[test]
fn test_equal_distances_prefer_lower_index() {
    let mut registry = ColliderRegistry::new();
    registry.insert(cube(BodyHandle::new(5, 0), Vector3::new(0.0, -3.0, 0.0)));
    registry.insert(cube(BodyHandle::new(2, 0), Vector3::new(0.0, -3.0, 0.0)));
    registry.insert(cube(BodyHandle::new(8, 0), Vector3::new(0.0, -3.0, 0.0)));

    let hit = registry.raycast(&Ray::new(Vector3::ZERO, Vector3::DOWN), None).unwrap();
    assert_eq!(hit.collider.index, 2);
}

#[test]
fn test_large_registry_matches_nearest_candidate() {
    let mut registry = ColliderRegistry::new();
    for i in 0..600u32 {
        // a column of cubes below the origin, every second slot stacked twice
        let depth = 3.0 + (i / 2) as f64 * 3.0;
        registry.insert(cube(BodyHandle::new(i, 0), Vector3::new(0.0, -depth, 0.0)));
    }

    let hit = registry.raycast(&Ray::new(Vector3::ZERO, Vector3::DOWN), None).unwrap();
    assert_eq!(hit.collider, BodyHandle::new(0, 0));
    assert_float_eq(hit.distance, 2.0, 1e-12, None);

    let hit = registry
        .raycast(&Ray::new(Vector3::ZERO, Vector3::DOWN), Some(BodyHandle::new(0, 0)))
        .unwrap();
    assert_eq!(hit.collider, BodyHandle::new(1, 0));
}

#[test]
fn test_stale_generation_does_not_touch_reused_slot() {
    let mut registry = ColliderRegistry::new();
    let old = BodyHandle::new(4, 0);
    let reused = BodyHandle::new(4, 1);
    registry.insert(cube(old, Vector3::ZERO));
    registry.remove(old);
    registry.insert(cube(reused, Vector3::new(0.0, -3.0, 0.0)));

    assert!(registry.get(old).is_none());
    assert!(!registry.update(old, Vector3::new(9.0, 9.0, 9.0), Quaternion::identity()));
    assert!(!registry.set_enabled(old, false));
    assert!(registry.remove(old).is_none());

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(reused).unwrap().shape.center, Vector3::new(0.0, -3.0, 0.0));
    let hit = registry.raycast(&Ray::new(Vector3::ZERO, Vector3::DOWN), None).unwrap();
    assert_eq!(hit.collider, reused);
}

#[test]
fn test_sparse_slots_iterate_in_handle_order() {
    let mut registry = ColliderRegistry::new();
    for index in [9, 2, 5] {
        registry.insert(cube(BodyHandle::new(index, 0), Vector3::ZERO));
    }

    let order: Vec<u32> = registry.iter().map(|proxy| proxy.handle.index).collect();
    assert_eq!(order, vec![2, 5, 9]);
    assert_eq!(registry.len(), 3);
}
