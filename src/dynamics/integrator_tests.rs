use approx::assert_relative_eq;
use crate::assert_float_eq;
use crate::dynamics::{apply_gravity, integrate};
use crate::models::{Body, MotionState, Vector3};
use crate::utils::PhysicsConstants;

fn free_fall_constants() -> PhysicsConstants {
    PhysicsConstants::default().with_gravity(10.0).with_air_resistance(0.0)
}

#[test]
fn test_free_fall_matches_closed_form() {
    let constants = free_fall_constants();
    let dt = 0.02;
    let start = 100.0;
    let mut body = Body::new_dynamic(Vector3::new(0.0, start, 0.0), 3.0, Vector3::ONE).unwrap();

    for n in 1..=50 {
        apply_gravity(&mut body, &constants);
        integrate(&mut body, &constants, dt);

        let n = n as f64;
        let expected_y = start - 10.0 * dt * dt * (n * n + 2.0 * n) / 2.0;
        assert_float_eq(body.velocity.y, -10.0 * n * dt, 1e-9, Some("vertical velocity"));
        assert_float_eq(body.position.y, expected_y, 1e-9, Some("height"));
    }
    assert_relative_eq!(body.acceleration, Vector3::new(0.0, -10.0, 0.0), epsilon = 1e-12);
}

#[test]
fn test_integrate_uses_mass() {
    let constants = free_fall_constants();
    let mut light = Body::new_dynamic(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    let mut heavy = Body::new_dynamic(Vector3::ZERO, 4.0, Vector3::ONE).unwrap();
    light.add_force(Vector3::new(8.0, 0.0, 0.0));
    heavy.add_force(Vector3::new(8.0, 0.0, 0.0));

    integrate(&mut light, &constants, 0.1);
    integrate(&mut heavy, &constants, 0.1);

    assert_float_eq(light.velocity.x, 0.8, 1e-12, None);
    assert_float_eq(heavy.velocity.x, 0.2, 1e-12, None);
}

#[test]
fn test_integrate_returns_residual_and_clears_accumulator() {
    let constants = free_fall_constants();
    let mut body = Body::new_dynamic(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    body.add_force(Vector3::new(1.0, 2.0, 3.0));
    body.add_force(Vector3::new(1.0, 0.0, -1.0));

    let residual = integrate(&mut body, &constants, 0.02);

    assert_eq!(residual, Vector3::new(2.0, 2.0, 2.0));
    assert_eq!(body.force, Vector3::ZERO);
}

#[test]
fn test_air_resistance_damps_velocity() {
    let constants = free_fall_constants().with_air_resistance(0.1);
    let mut body = Body::new_dynamic(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    body.velocity = Vector3::new(10.0, 0.0, -5.0);

    integrate(&mut body, &constants, 0.02);

    assert_relative_eq!(body.velocity, Vector3::new(9.0, 0.0, -4.5), epsilon = 1e-12);
    // damping comes after the position update
    assert_relative_eq!(body.position, Vector3::new(0.2, 0.0, -0.1), epsilon = 1e-12);
}

#[test]
fn test_horizontal_speed_is_capped() {
    let constants = free_fall_constants().with_max_speed(5.0);
    let mut body = Body::new_dynamic(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    body.velocity = Vector3::new(30.0, -30.0, -12.0);

    integrate(&mut body, &constants, 0.02);

    assert_eq!(body.velocity, Vector3::new(5.0, -30.0, -5.0));
}

#[test]
fn test_infinite_max_speed_disables_cap() {
    let constants = free_fall_constants().with_max_speed(f64::INFINITY);
    let mut body = Body::new_dynamic(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    body.velocity = Vector3::new(1.0e6, 0.0, 0.0);

    integrate(&mut body, &constants, 0.02);

    assert_eq!(body.velocity.x, 1.0e6);
}

#[test]
fn test_gravity_skips_resting_and_static_bodies() {
    let constants = free_fall_constants();
    let mut resting = Body::new_dynamic(Vector3::ZERO, 1.0, Vector3::ONE).unwrap();
    resting.halt();
    let mut wall = Body::new_static(Vector3::ZERO, Vector3::ONE).unwrap();

    apply_gravity(&mut resting, &constants);
    apply_gravity(&mut wall, &constants);

    assert_eq!(resting.force, Vector3::ZERO);
    assert_eq!(resting.state, MotionState::Resting);
    assert_eq!(wall.force, Vector3::ZERO);
}

#[test]
fn test_static_body_is_never_integrated() {
    let constants = free_fall_constants();
    let mut wall = Body::new_static(Vector3::new(1.0, 2.0, 3.0), Vector3::ONE).unwrap();
    wall.force = Vector3::new(0.0, -100.0, 0.0);

    let residual = integrate(&mut wall, &constants, 0.02);

    assert_eq!(residual, Vector3::ZERO);
    assert_eq!(wall.position, Vector3::new(1.0, 2.0, 3.0));
}
