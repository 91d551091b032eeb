use crate::dynamics::{settle, should_sleep};
use crate::models::{Body, BodyHandle, CardinalDirection, ContactRecord, MotionState, Vector3};
use crate::utils::PhysicsConstants;

fn ground_contact() -> ContactRecord {
    ContactRecord {
        normal: Vector3::UP,
        point: Vector3::new(0.0, 1.0, 0.0),
        distance: 1.0,
        collider: BodyHandle::new(1, 0),
        age: 3,
    }
}

fn slow_body_with_mass(mass: f64) -> Body {
    let mut body = Body::new_dynamic(Vector3::new(0.0, 1.0, 0.0), mass, Vector3::ONE).unwrap();
    body.velocity = Vector3::new(0.01, 0.0, 0.0);
    body.acceleration = Vector3::new(0.0, -0.5, 0.0);
    body.contacts.insert(CardinalDirection::Down, ground_contact());
    body
}

fn slow_body() -> Body {
    slow_body_with_mass(1.0)
}

#[test]
fn test_slow_body_without_residual_sleeps() {
    let constants = PhysicsConstants::default();
    let mut body = slow_body();

    assert!(should_sleep(&body, Vector3::new(0.0, 0.01, 0.0), &constants));
    assert!(settle(&mut body, Vector3::new(0.0, 0.01, 0.0), &constants));

    assert_eq!(body.state, MotionState::Resting);
    assert_eq!(body.velocity, Vector3::ZERO);
    assert_eq!(body.acceleration, Vector3::ZERO);
    assert_eq!(body.force, Vector3::ZERO);
}

#[test]
fn test_fast_body_stays_active() {
    let constants = PhysicsConstants::default();
    let mut body = slow_body();
    body.velocity = Vector3::new(0.0, -1.0, 0.0);

    assert!(!settle(&mut body, Vector3::ZERO, &constants));
    assert_eq!(body.state, MotionState::Active);
}

#[test]
fn test_unsupported_body_under_gravity_stays_active() {
    let constants = PhysicsConstants::default();
    let mut body = slow_body();
    let weight = constants.gravity_force(body.mass());

    assert!(!settle(&mut body, weight, &constants));
    assert_eq!(body.velocity, Vector3::new(0.01, 0.0, 0.0));
}

#[test]
fn test_thresholds_are_configurable() {
    let strict = PhysicsConstants::default().with_sleep_thresholds(0.001, 0.001);
    let body = slow_body();

    assert!(!should_sleep(&body, Vector3::ZERO, &strict));
}

#[test]
fn test_only_active_dynamic_bodies_sleep() {
    let constants = PhysicsConstants::default();
    let wall = Body::new_static(Vector3::ZERO, Vector3::ONE).unwrap();
    let mut resting = slow_body();
    resting.halt();

    assert!(!should_sleep(&wall, Vector3::ZERO, &constants));
    assert!(!should_sleep(&resting, Vector3::ZERO, &constants));
}

#[test]
fn test_external_force_wakes_resting_body() {
    let constants = PhysicsConstants::default();
    let mut body = slow_body();
    settle(&mut body, Vector3::ZERO, &constants);

    body.add_force(Vector3::new(0.0, 50.0, 0.0));

    assert_eq!(body.state, MotionState::Active);
    assert_eq!(body.force, Vector3::new(0.0, 50.0, 0.0));
}

#[test]
fn test_body_without_contacts_never_sleeps() {
    let constants = PhysicsConstants::default();
    let mut body = slow_body();
    body.contacts.clear();

    assert!(!should_sleep(&body, Vector3::ZERO, &constants));
    assert!(!settle(&mut body, Vector3::ZERO, &constants));
    assert_eq!(body.state, MotionState::Active);
}

#[test]
fn test_weight_keeps_bodies_of_any_mass_awake() {
    let constants = PhysicsConstants::default();

    for mass in [1e-6, 1e-4, 0.001, 0.004, 0.01, 1.0, 100.0, 1e4] {
        let body = slow_body_with_mass(mass);
        let weight = constants.gravity_force(mass);
        assert!(!should_sleep(&body, weight, &constants), "mass {} slept under its own weight", mass);

        let mut floating = body.clone();
        floating.contacts.clear();
        assert!(!should_sleep(&floating, Vector3::ZERO, &constants), "mass {} slept without support", mass);
    }
}

#[test]
fn test_force_threshold_scales_with_mass() {
    let constants = PhysicsConstants::default();
    let heavy = slow_body_with_mass(100.0);
    let light = slow_body_with_mass(0.01);
    let residual = Vector3::new(0.0, 1.0, 0.0);

    assert!(should_sleep(&heavy, residual, &constants));
    assert!(!should_sleep(&light, residual, &constants));
}
