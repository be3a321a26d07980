//! The player vehicle
//!
//! A plain [`Body`] plus health and the helpers the input layer drives:
//! thrust along the facing direction, damping, and thruster flame geometry.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::body::Body;
use super::procgen::vehicle_shape;
use super::trig::TrigTable;
use crate::consts::{HEALTH_DRAIN, MAX_HEALTH};
use crate::error::ShapeError;
use crate::rotate_local;

/// Which thruster flame set to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thruster {
    /// Main engine, flames out the back
    Forward = 0,
    /// Retro jets, flames past the nose
    Backward = 1,
    /// Turning left, flames off the right wing
    Left = 2,
    /// Turning right, flames off the left wing
    Right = 3,
}

impl Thruster {
    pub const ALL: [Thruster; 4] = [
        Thruster::Forward,
        Thruster::Backward,
        Thruster::Left,
        Thruster::Right,
    ];
}

/// Two triangles per thruster, local space, nose toward -y
const THRUSTER_LOCAL: [[Vec2; 6]; 4] = [
    [
        Vec2::new(-20.0, 28.0),
        Vec2::new(-12.0, 25.0),
        Vec2::new(-18.0, 44.0),
        Vec2::new(12.0, 25.0),
        Vec2::new(20.0, 28.0),
        Vec2::new(18.0, 44.0),
    ],
    [
        Vec2::new(-10.0, -16.0),
        Vec2::new(-6.0, -24.0),
        Vec2::new(-14.0, -34.0),
        Vec2::new(6.0, -24.0),
        Vec2::new(10.0, -16.0),
        Vec2::new(14.0, -34.0),
    ],
    [
        Vec2::new(24.0, 20.0),
        Vec2::new(28.0, 26.0),
        Vec2::new(40.0, 16.0),
        Vec2::new(14.0, -4.0),
        Vec2::new(18.0, 4.0),
        Vec2::new(28.0, -6.0),
    ],
    [
        Vec2::new(-28.0, 26.0),
        Vec2::new(-24.0, 20.0),
        Vec2::new(-40.0, 16.0),
        Vec2::new(-18.0, 4.0),
        Vec2::new(-14.0, -4.0),
        Vec2::new(-28.0, -6.0),
    ],
];

/// Player vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    body: Body,
    health: f32,
    thrusters: [[Vec2; 6]; 4],
}

impl Vehicle {
    pub const MAX_HEALTH: f32 = MAX_HEALTH;

    /// Create at `position`, facing up, at full health
    pub fn new(position: Vec2, trig: &TrigTable) -> Result<Self, ShapeError> {
        let mut vehicle = Self {
            body: Body::new(vehicle_shape()?, position, trig),
            health: MAX_HEALTH,
            thrusters: THRUSTER_LOCAL,
        };
        vehicle.refresh(trig);
        Ok(vehicle)
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub(crate) fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    // --- kinematic mutators for the input layer ---

    pub fn set_position(&mut self, position: Vec2) {
        self.body.set_position(position);
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.body.set_velocity(velocity);
    }

    pub fn add_velocity(&mut self, delta: Vec2) {
        self.body.add_velocity(delta);
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.body.set_angle(angle);
    }

    pub fn add_angle(&mut self, delta: f32) {
        self.body.add_angle(delta);
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.body.set_angular_velocity(angular_velocity);
    }

    pub fn add_angular_velocity(&mut self, delta: f32) {
        self.body.add_angular_velocity(delta);
    }

    // --- health ---

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, MAX_HEALTH);
    }

    /// Add (or with a negative amount, remove) health, clamped to `[0, MAX_HEALTH]`
    pub fn add_health(&mut self, amount: f32) {
        self.set_health(self.health + amount);
    }

    /// Constant drain over time
    pub fn decay_health(&mut self, dt: f32) {
        self.add_health(-HEALTH_DRAIN * dt);
    }

    /// Health ran out
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0
    }

    // --- motion helpers ---

    /// Velocity delta for thrusting along the facing direction.
    ///
    /// Angle 0 faces up (-y), so the facing is rotated a quarter turn back
    /// before projecting.
    pub fn thrust_vector(&self, magnitude: f32, trig: &TrigTable) -> Vec2 {
        let (sin, cos) = trig.sin_cos(self.body.angle() - FRAC_PI_2);
        Vec2::new(cos, sin) * magnitude
    }

    /// Thrust along the facing direction for one frame
    pub fn thrust(&mut self, magnitude: f32, dt: f32, trig: &TrigTable) {
        let delta = self.thrust_vector(magnitude * dt, trig);
        self.body.add_velocity(delta);
    }

    /// Bleed off a fraction of velocity per frame
    pub fn damp_velocity(&mut self, factor: f32, dt: f32) {
        let keep = (1.0 - factor * dt).max(0.0);
        self.body.set_velocity(self.body.velocity() * keep);
    }

    /// Bleed off a fraction of angular velocity per frame
    pub fn damp_angular_velocity(&mut self, factor: f32, dt: f32) {
        let keep = (1.0 - factor * dt).max(0.0);
        self.body.set_angular_velocity(self.body.angular_velocity() * keep);
    }

    // --- per-frame update ---

    /// Integrate and rebuild outline and flame geometry
    pub fn step(&mut self, dt: f32, trig: &TrigTable) {
        self.body.step(dt, trig);
        self.refresh_thrusters(trig);
    }

    /// Rebuild caches after a direct position or angle write
    pub fn refresh(&mut self, trig: &TrigTable) {
        self.body.refresh(trig);
        self.refresh_thrusters(trig);
    }

    fn refresh_thrusters(&mut self, trig: &TrigTable) {
        let (sin, cos) = trig.sin_cos(self.body.angle());
        let pos = self.body.position();
        for (world, local) in self.thrusters.iter_mut().zip(THRUSTER_LOCAL.iter()) {
            for (w, l) in world.iter_mut().zip(local.iter()) {
                *w = rotate_local(*l, sin, cos, pos);
            }
        }
    }

    /// World-space flame triangles for one thruster (two triangles, 6 points)
    #[inline]
    pub fn thruster_triangles(&self, thruster: Thruster) -> &[Vec2; 6] {
        &self.thrusters[thruster as usize]
    }
}
