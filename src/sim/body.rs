//! Kinematic polygon bodies
//!
//! A body owns its [`Shape`] and keeps a world-space copy of the outline that
//! is rebuilt from position and angle on every step.

use glam::Vec2;
use serde::Serialize;

use super::shape::Shape;
use super::trig::TrigTable;
use crate::rotate_local;

/// Axis-aligned bounding box (min/max corners)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Tight box around a set of points
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    /// Open-interval overlap: boxes that only touch do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closed containment test
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A moving polygon.
///
/// Velocities are in units per frame at 60 FPS; `step` takes the frame time
/// scaled to that rate.
#[derive(Debug, Clone)]
pub struct Body {
    shape: Shape,
    position: Vec2,
    velocity: Vec2,
    angle: f32,
    angular_velocity: f32,
    /// Closed loop: outline plus a copy of vertex 0
    world_vertices: Vec<Vec2>,
    bounding_box: Aabb,
}

impl Body {
    /// Create a body at rest at `position`, with its transform cache built
    pub fn new(shape: Shape, position: Vec2, trig: &TrigTable) -> Self {
        let world_vertices = Vec::with_capacity(shape.max_vertexes() + 1);
        let mut body = Self {
            shape,
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            world_vertices,
            bounding_box: Aabb::default(),
        };
        body.refresh(trig);
        body
    }

    // --- kinematics ---

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    pub fn add_position(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    pub fn add_angle(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn add_angular_velocity(&mut self, delta: f32) {
        self.angular_velocity += delta;
    }

    /// Explicit Euler step, then rebuild the transform cache
    pub fn step(&mut self, dt: f32, trig: &TrigTable) {
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
        self.refresh(trig);
    }

    /// Rebuild world vertices and bounding box from position and angle.
    ///
    /// Needed after any direct position/angle write that should be visible
    /// to collision tests before the next `step`.
    pub fn refresh(&mut self, trig: &TrigTable) {
        let (sin, cos) = trig.sin_cos(self.angle);
        self.world_vertices.clear();
        self.world_vertices.extend(
            self.shape
                .vertices()
                .iter()
                .map(|v| rotate_local(*v, sin, cos, self.position)),
        );
        self.bounding_box = Aabb::from_points(&self.world_vertices);
        let first = self.world_vertices[0];
        self.world_vertices.push(first);
    }

    // --- shape and cache access ---

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Swap in a new outline; the cache is rebuilt immediately
    pub fn reshape(&mut self, shape: Shape, trig: &TrigTable) {
        if shape.max_vertexes() + 1 > self.world_vertices.capacity() {
            self.world_vertices = Vec::with_capacity(shape.max_vertexes() + 1);
        }
        self.shape = shape;
        self.refresh(trig);
    }

    /// Closed world-space outline (last vertex repeats the first)
    #[inline]
    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world_vertices
    }

    /// Length of the closed outline, i.e. `shape().vertex_count() + 1`
    #[inline]
    pub fn world_vertex_count(&self) -> usize {
        self.world_vertices.len()
    }

    /// Closed outline as raw bytes (pairs of `f32`) for vertex buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.world_vertices.as_slice())
    }

    #[inline]
    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }
}
