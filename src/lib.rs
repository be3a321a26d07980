//! Drift Field - simulation core for a scrolling asteroid field
//!
//! Core modules:
//! - `sim`: Per-frame simulation (bodies, collisions, pools, camera follow)
//! - `settings`: Startup configuration loaded from JSON
//! - `error`: Construction errors
//!
//! Rendering, audio and input polling live outside this crate. They read
//! positions and vertex loops from [`sim::World`] and drive the player
//! vehicle through its kinematic mutators.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ShapeError;
pub use settings::{Settings, SettingsError, WindowSettings, WorldSettings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame rate that all per-frame velocities are expressed against.
    /// `dt` passed to steps is `frame_seconds * BASE_FPS`.
    pub const BASE_FPS: f32 = 60.0;

    /// Trig lookup table resolution (samples per full turn)
    pub const TRIG_TABLE_SIZE: usize = 40;

    /// Vertex cap for generic bodies (vehicle, pickup)
    pub const MAX_VERTEXES: usize = 31;
    /// Vertex cap for asteroid shapes
    pub const ASTEROID_MAX_VERTEXES: usize = 47;
    /// Smallest asteroid vertex count handed out by the generator
    pub const ASTEROID_MIN_VERTEXES: usize = 6;
    /// Asteroid scale range `[MIN, MIN + SPAN)`
    pub const ASTEROID_SCALE_MIN: f32 = 5.0;
    pub const ASTEROID_SCALE_SPAN: f32 = 50.0;

    /// Pool capacities
    pub const ASTEROID_POOL_SIZE: usize = 192;
    pub const PICKUP_POOL_SIZE: usize = 12;

    /// Positional pushback applied per frame to colliding bodies
    pub const COLLISION_PUSHBACK: f32 = 0.04;
    /// Extra distance beyond the viewport before an asteroid is culled.
    /// Must exceed the largest possible asteroid radius.
    pub const CULLING_MARGIN: f32 = 360.0;

    /// Side of the square (centered on the origin) used for initial placement
    pub const PLACEMENT_EXTENT: f32 = 10000.0;
    /// Candidate offset per colliding slot index when retrying placement
    pub const PLACEMENT_RETRY_OFFSET: f32 = 1000.0;
    /// Placement attempts before accepting an overlapping candidate
    pub const PLACEMENT_ATTEMPTS: usize = 100;

    /// Spawned velocity components are drawn from `[-SPAWN_SPEED, SPAWN_SPEED)`
    pub const SPAWN_SPEED: f32 = 1.0;
    /// Spawned angular velocity is drawn from `[-SPAWN_SPIN, SPAWN_SPIN)`
    pub const SPAWN_SPIN: f32 = 0.05;

    /// Vehicle health
    pub const MAX_HEALTH: f32 = 1000.0;
    /// Health drained per frame by `Vehicle::decay_health`
    pub const HEALTH_DRAIN: f32 = 0.05;
    /// Health restored by one pickup
    pub const PICKUP_RECOVERY: f32 = 100.0;
    /// Velocity impulse factor applied to the vehicle on asteroid contact
    pub const COLLISION_IMPULSE: f32 = 0.5;
    /// Damage factor applied to the squared-speed differential
    pub const COLLISION_DAMAGE: f32 = 0.002;

    /// Camera follow tuning
    pub const CAMERA_SETTLE_DIST2: f32 = 0.05;
    pub const CAMERA_MAX_SPEED: f32 = 0.5;
    pub const CAMERA_GAIN: f32 = 0.06;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Rotate a local-space point by precomputed sin/cos, then translate
#[inline]
pub fn rotate_local(local: Vec2, sin: f32, cos: f32, offset: Vec2) -> Vec2 {
    Vec2::new(
        local.x * cos - local.y * sin + offset.x,
        local.x * sin + local.y * cos + offset.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!(normalize_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_rotate_local_quarter_turn() {
        // sin=1, cos=0 is a quarter turn
        let p = rotate_local(Vec2::new(10.0, 0.0), 1.0, 0.0, Vec2::new(5.0, 5.0));
        assert!((p.x - 5.0).abs() < 1e-5);
        assert!((p.y - 15.0).abs() < 1e-5);
    }
}
