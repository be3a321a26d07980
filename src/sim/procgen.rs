//! Shape generation for body kinds
//!
//! Asteroids get a random star-like outline; the vehicle and pickups use
//! fixed hand-drawn outlines. All shapes are centered on the origin.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::shape::Shape;
use super::trig::TrigTable;
use crate::consts::{
    ASTEROID_MAX_VERTEXES, ASTEROID_MIN_VERTEXES, ASTEROID_SCALE_MIN, ASTEROID_SCALE_SPAN,
};
use crate::error::ShapeError;

/// Vehicle outline: a chevron whose tip points to -y (up on screen) at angle 0
pub const VEHICLE_OUTLINE: [Vec2; 4] = [
    Vec2::new(0.0, -40.0),
    Vec2::new(32.0, 32.0),
    Vec2::new(0.0, 16.0),
    Vec2::new(-32.0, 32.0),
];

/// Pickup outline: a crescent-and-star coin, 17 points
pub const PICKUP_OUTLINE: [Vec2; 17] = [
    Vec2::new(2.0, 11.0),
    Vec2::new(-4.0, 10.0),
    Vec2::new(-10.0, 6.0),
    Vec2::new(-12.0, 0.0),
    Vec2::new(-11.0, -6.0),
    Vec2::new(-6.0, -4.0),
    Vec2::new(0.0, -13.0),
    Vec2::new(8.0, -12.0),
    Vec2::new(12.0, -10.0),
    Vec2::new(8.0, -10.0),
    Vec2::new(4.0, -8.0),
    Vec2::new(1.0, -6.0),
    Vec2::new(-1.0, -3.0),
    Vec2::new(-1.0, 2.0),
    Vec2::new(0.0, 6.0),
    Vec2::new(4.0, 10.0),
    Vec2::new(8.0, 12.0),
];

/// Radius of one asteroid vertex; bumpiness grows with `scale`
#[inline]
fn asteroid_radius<R: Rng>(rng: &mut R, scale: f32) -> f32 {
    rng.random::<f32>() * (scale + 20.0) + scale * scale / 16.0
}

/// Largest radius an asteroid of `scale` can reach
pub fn asteroid_max_radius(scale: f32) -> f32 {
    scale + 20.0 + scale * scale / 16.0
}

/// Irregular outline with `vertex_count` evenly spaced spokes of random length.
///
/// No convexity is enforced; the result is usually a concave star.
pub fn asteroid_shape<R: Rng>(
    rng: &mut R,
    trig: &TrigTable,
    vertex_count: usize,
    scale: f32,
) -> Result<Shape, ShapeError> {
    let step = TAU / vertex_count as f32;
    let vertices = (0..vertex_count)
        .map(|i| {
            let angle = i as f32 * step;
            let r = asteroid_radius(rng, scale);
            Vec2::new(r * trig.cos(angle), r * trig.sin(angle))
        })
        .collect();
    Shape::with_cap(vertices, ASTEROID_MAX_VERTEXES)
}

/// Asteroid outline with a random vertex count and scale
pub fn random_asteroid_shape<R: Rng>(rng: &mut R, trig: &TrigTable) -> Result<Shape, ShapeError> {
    let vertex_count = rng.random_range(ASTEROID_MIN_VERTEXES..ASTEROID_MAX_VERTEXES);
    let scale = rng.random::<f32>() * ASTEROID_SCALE_SPAN + ASTEROID_SCALE_MIN;
    asteroid_shape(rng, trig, vertex_count, scale)
}

pub fn vehicle_shape() -> Result<Shape, ShapeError> {
    Shape::new(VEHICLE_OUTLINE.to_vec())
}

pub fn pickup_shape() -> Result<Shape, ShapeError> {
    Shape::new(PICKUP_OUTLINE.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CULLING_MARGIN;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_asteroid_vertex_count() {
        let mut rng = Pcg32::seed_from_u64(7);
        let trig = TrigTable::new();
        let shape = asteroid_shape(&mut rng, &trig, 12, 20.0).unwrap();
        assert_eq!(shape.vertex_count(), 12);
    }

    #[test]
    fn test_asteroid_radius_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let trig = TrigTable::new();
        let scale = 40.0;
        let shape = asteroid_shape(&mut rng, &trig, 20, scale).unwrap();
        let min_r = scale * scale / 16.0;
        for v in shape.vertices() {
            let r = v.length();
            assert!(r >= min_r - 1e-3, "radius {r} below floor {min_r}");
            assert!(r <= asteroid_max_radius(scale) + 1e-3);
        }
    }

    #[test]
    fn test_asteroid_rejects_bad_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        let trig = TrigTable::new();
        assert!(asteroid_shape(&mut rng, &trig, 2, 10.0).is_err());
        assert!(asteroid_shape(&mut rng, &trig, ASTEROID_MAX_VERTEXES + 1, 10.0).is_err());
        assert!(asteroid_shape(&mut rng, &trig, ASTEROID_MAX_VERTEXES, 10.0).is_ok());
    }

    #[test]
    fn test_random_asteroids_in_range() {
        let mut rng = Pcg32::seed_from_u64(99);
        let trig = TrigTable::new();
        for _ in 0..200 {
            let shape = random_asteroid_shape(&mut rng, &trig).unwrap();
            assert!(shape.vertex_count() >= ASTEROID_MIN_VERTEXES);
            assert!(shape.vertex_count() < ASTEROID_MAX_VERTEXES);
            // The cull margin has to cover the biggest asteroid
            assert!(shape.radius() < CULLING_MARGIN);
        }
    }

    #[test]
    fn test_same_seed_same_shape() {
        let trig = TrigTable::new();
        let a = random_asteroid_shape(&mut Pcg32::seed_from_u64(5), &trig).unwrap();
        let b = random_asteroid_shape(&mut Pcg32::seed_from_u64(5), &trig).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_shapes() {
        assert_eq!(vehicle_shape().unwrap().vertex_count(), 4);
        assert_eq!(pickup_shape().unwrap().vertex_count(), 17);
    }

    #[test]
    fn test_vehicle_tip_points_up() {
        let shape = vehicle_shape().unwrap();
        let tip = shape.vertices()[0];
        assert!(tip.y < 0.0 && tip.x == 0.0);
    }
}
