// demos/bouncing_bodies.rs
//
// Drops a handful of boxes onto the ground, next to a wall and a tilted ramp, and prints
// their state once per simulated second. Run with `RUST_LOG=debug` to see impacts and sleep
// transitions.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_point_physics::apis::PhysicsWorld;
use rs_point_physics::errors::PhysicsError;
use rs_point_physics::models::{Quaternion, Vector3};
use rs_point_physics::utils::PhysicsConstants;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let constants = PhysicsConstants::default().with_restitution(0.6).with_friction(0.3);
    let mut world = PhysicsWorld::with_constants(constants)?;

    world.create_static(Vector3::new(0.0, -1.0, 0.0), Vector3::new(50.0, 1.0, 50.0), Quaternion::identity())?;
    world.create_static(Vector3::new(12.0, 5.0, 0.0), Vector3::new(1.0, 5.0, 20.0), Quaternion::identity())?;
    world.create_static(
        Vector3::new(-10.0, 0.5, 0.0),
        Vector3::new(4.0, 0.5, 4.0),
        Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), 15f64.to_radians()),
    )?;

    let mut rng = StdRng::seed_from_u64(2024);
    let mut boxes = Vec::new();
    for i in 0..6 {
        let position = Vector3::new(i as f64 * 4.0 - 10.0, rng.random_range(3.0..8.0), rng.random_range(-3.0..3.0));
        let handle = world.create_body(position, rng.random_range(0.5..3.0), Vector3::splat(0.5))?;
        world.set_velocity(handle, Vector3::new(rng.random_range(-2.0..4.0), 0.0, 0.0))?;
        boxes.push(handle);
    }

    let projectile = world.spawn_projectile(
        Vector3::new(-5.0, 2.0, 0.0),
        0.2,
        Vector3::splat(0.1),
        Vector3::new(15.0, 4.0, 0.0),
        1.5,
    )?;

    let frame_time = 1.0 / 60.0;
    for frame in 1..=600 {
        let report = world.tick(frame_time)?;
        if report.expired.contains(&projectile) {
            info!("Projectile {} expired after {:.2}s", projectile, world.elapsed_time());
        }

        if frame % 60 == 0 {
            println!("t = {:.1}s", world.elapsed_time());
            for &handle in &boxes {
                let position = world.position(handle)?;
                println!(
                    "  box {}: pos=({:.3}, {:.3}, {:.3}) moving={} grounded={}",
                    handle,
                    position.x,
                    position.y,
                    position.z,
                    world.is_in_motion(handle)?,
                    world.is_grounded(handle)?,
                );
            }
        }
    }

    Ok(())
}
