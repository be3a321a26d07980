//! Drift Field headless runner
//!
//! Builds a world from a settings file and flies a scripted pilot through it
//! for a fixed number of frames, then prints the final world stats as JSON.
//!
//! Usage: `drift-field [settings.json] [frames]`

use std::process::ExitCode;

use drift_field::Settings;
use drift_field::sim::{CameraFollower, World, WorldHooks};
use glam::Vec2;

/// Spawn distance for recycled asteroids, just past the view diagonal
const SPAWN_RANGE_SCALE: f32 = 0.75;
const ASTEROID_SPAWN_INTERVAL: u64 = 20;
const PICKUP_SPAWN_INTERVAL: u64 = 300;
const PILOT_THRUST: f32 = 0.08;
const PILOT_TURN: f32 = 0.002;
const PILOT_DAMPING: f32 = 0.01;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames: u64 = match args.next().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {e}");
            return ExitCode::FAILURE;
        }
        None => 3600,
    };

    log::info!("Drift Field (headless) starting, {frames} frames");

    let hooks = WorldHooks::default()
        .on_pickup_collected(|| log::info!("Pickup collected"))
        .on_vehicle_collision(|| log::debug!("Collision"));

    let viewport = settings.window.viewport();
    let mut world = match World::new(Vec2::ZERO, viewport, &settings.world, hooks) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to build world: {e}");
            return ExitCode::FAILURE;
        }
    };
    let trig = world.trig();
    let dt = settings.window.frame_dt();
    let spawn_range = viewport.length() * SPAWN_RANGE_SCALE;

    let mut camera = CameraFollower::new(world.vehicle().body().position());

    for _ in 0..frames {
        // Scripted input: slow left turn under constant thrust
        let vehicle = world.vehicle_mut();
        vehicle.add_angular_velocity(-PILOT_TURN * dt);
        vehicle.thrust(PILOT_THRUST, dt, trig);
        vehicle.damp_velocity(PILOT_DAMPING, dt);
        vehicle.damp_angular_velocity(PILOT_DAMPING * 4.0, dt);
        vehicle.decay_health(dt);

        world.step(dt);

        let center = world.vehicle().body().position();
        if world.frame() % ASTEROID_SPAWN_INTERVAL == 0 {
            world.spawn_asteroid_nearby(center, spawn_range);
        }
        if world.frame() % PICKUP_SPAWN_INTERVAL == 0 {
            world.spawn_pickup_nearby(center, spawn_range * 0.5);
        }

        camera.target(center);
        camera.step(dt);
        world.set_position(camera.get() - viewport / 2.0);

        if world.vehicle().is_depleted() {
            log::info!("Vehicle destroyed at frame {}", world.frame());
            break;
        }
    }

    match serde_json::to_string_pretty(&world.stats()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to encode stats: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
