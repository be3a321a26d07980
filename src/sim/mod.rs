//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, owned by the world
//! - Trig through the shared lookup table
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or input dependencies

pub mod body;
pub mod camera;
pub mod collision;
pub mod pool;
pub mod procgen;
pub mod shape;
pub mod trig;
pub mod vehicle;
pub mod world;

pub use body::{Aabb, Body};
pub use camera::CameraFollower;
pub use collision::{is_collision, segments_intersect};
pub use pool::Pool;
pub use procgen::{asteroid_shape, pickup_shape, random_asteroid_shape, vehicle_shape};
pub use shape::Shape;
pub use trig::TrigTable;
pub use vehicle::{Thruster, Vehicle};
pub use world::{World, WorldHooks, WorldStats};
