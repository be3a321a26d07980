//! Collision detection between polygon bodies
//!
//! Broad phase rejects on bounding boxes. Narrow phase tests every edge of one
//! closed outline against every edge of the other. Works for concave and
//! self-intersecting outlines since it never assumes convexity. Containment
//! without any edge crossing is not reported.

use glam::Vec2;

use super::body::Body;

/// Orientation of the triangle `a, b, c`: true if counter-clockwise
/// (positive cross product of `b - a` and `c - a`)
#[inline]
pub fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(c - a) > 0.0
}

/// Check whether segments `p1-p2` and `q1-q2` cross.
///
/// `ccw(q1, q2, p)` is the cyclic rotation of `ccw(p, q1, q2)`. Both segments
/// are tested from their own base point so swapping the arguments evaluates
/// the exact same float expressions.
#[inline]
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    ccw(q1, q2, p1) != ccw(q1, q2, p2) && ccw(p1, p2, q1) != ccw(p1, p2, q2)
}

/// Check whether two closed outlines have any crossing edge pair.
///
/// Both slices must repeat their first vertex at the end.
pub fn outlines_intersect(a: &[Vec2], b: &[Vec2]) -> bool {
    a.windows(2).any(|ea| {
        b.windows(2)
            .any(|eb| segments_intersect(ea[0], ea[1], eb[0], eb[1]))
    })
}

/// Check collision between two bodies using their cached outlines.
///
/// A body never collides with itself.
pub fn is_collision(a: &Body, b: &Body) -> bool {
    if std::ptr::eq(a, b) {
        return false;
    }

    if !a.bounding_box().overlaps(&b.bounding_box()) {
        return false;
    }

    outlines_intersect(a.world_vertices(), b.world_vertices())
}

/// Displacement pushing `a` away from `b` along the line between centers
#[inline]
pub fn pushback(a: Vec2, b: Vec2, strength: f32, dt: f32) -> Vec2 {
    (a - b) * strength * dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Shape;
    use crate::sim::trig::TrigTable;
    use proptest::prelude::*;

    fn square(half: f32, pos: Vec2) -> Body {
        let shape = Shape::new(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ])
        .unwrap();
        Body::new(shape, pos, &TrigTable::new())
    }

    #[test]
    fn test_same_center_squares_collide() {
        let a = square(5.0, Vec2::new(100.0, 100.0));
        let b = square(5.0, Vec2::new(100.0, 100.0));
        assert!(is_collision(&a, &b));
    }

    #[test]
    fn test_distant_squares_miss() {
        let a = square(5.0, Vec2::new(0.0, 0.0));
        let b = square(5.0, Vec2::new(1000.0, 0.0));
        assert!(!is_collision(&a, &b));
    }

    #[test]
    fn test_no_self_collision() {
        let a = square(5.0, Vec2::ZERO);
        assert!(!is_collision(&a, &a));
    }

    #[test]
    fn test_partial_overlap() {
        let a = square(5.0, Vec2::ZERO);
        let b = square(5.0, Vec2::new(7.0, 3.0));
        assert!(is_collision(&a, &b));
        assert!(is_collision(&b, &a));
    }

    #[test]
    fn test_touching_edges_pruned() {
        // Boxes share the edge x=5 exactly; open-interval broad phase rejects
        let a = square(5.0, Vec2::ZERO);
        let b = square(5.0, Vec2::new(10.0, 0.0));
        assert!(!is_collision(&a, &b));
    }

    #[test]
    fn test_aabb_overlap_without_edge_crossing() {
        // Thin diagonal sliver whose box overlaps the square's box but whose
        // edges stay clear of it
        let trig = TrigTable::new();
        let sliver = Shape::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(20.0, 21.0),
        ])
        .unwrap();
        let a = Body::new(sliver, Vec2::ZERO, &trig);
        let b = square(2.0, Vec2::new(17.0, 3.0));
        assert!(a.bounding_box().overlaps(&b.bounding_box()));
        assert!(!is_collision(&a, &b));
    }

    #[test]
    fn test_segments_intersect() {
        let cross = segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(cross);

        let parallel = segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        );
        assert!(!parallel);
    }

    #[test]
    fn test_pushback_direction() {
        let d = pushback(Vec2::new(10.0, 0.0), Vec2::ZERO, 0.04, 1.0);
        assert!(d.x > 0.0);
        assert_eq!(d.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_collision_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            bx in -50.0f32..50.0, by in -50.0f32..50.0,
            ha in 1.0f32..30.0, hb in 1.0f32..30.0,
        ) {
            let a = square(ha, Vec2::new(ax, ay));
            let b = square(hb, Vec2::new(bx, by));
            prop_assert_eq!(is_collision(&a, &b), is_collision(&b, &a));
        }
    }
}
