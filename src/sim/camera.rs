//! Camera follow filter
//!
//! Moves the view toward a target at a rate proportional to the squared
//! remaining distance, capped. Far targets are approached quickly and the
//! camera stops dead once inside the settle threshold.

use glam::Vec2;

use crate::consts::{CAMERA_GAIN, CAMERA_MAX_SPEED, CAMERA_SETTLE_DIST2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollower {
    settle_dist2: f32,
    max_speed: f32,
    gain: f32,
    current: Vec2,
    target: Vec2,
}

impl CameraFollower {
    /// Camera resting at `pos` with default tuning
    pub fn new(pos: Vec2) -> Self {
        Self::with_tuning(pos, CAMERA_SETTLE_DIST2, CAMERA_MAX_SPEED, CAMERA_GAIN)
    }

    pub fn with_tuning(pos: Vec2, settle_dist2: f32, max_speed: f32, gain: f32) -> Self {
        Self {
            settle_dist2,
            max_speed,
            gain,
            current: pos,
            target: pos,
        }
    }

    #[inline]
    pub fn get(&self) -> Vec2 {
        self.current
    }

    /// Teleport; the target moves too
    pub fn set(&mut self, pos: Vec2) {
        self.current = pos;
        self.target = pos;
    }

    pub fn target(&mut self, pos: Vec2) {
        self.target = pos;
    }

    #[inline]
    pub fn target_position(&self) -> Vec2 {
        self.target
    }

    pub fn step(&mut self, dt: f32) {
        let diff = self.target - self.current;
        let dist2 = diff.length_squared();

        if dist2 > self.settle_dist2 {
            let rate = dist2.min(self.max_speed);
            self.current += diff * rate * self.gain * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_resets_target() {
        let mut cam = CameraFollower::new(Vec2::ZERO);
        cam.target(Vec2::new(5.0, 5.0));
        cam.set(Vec2::new(1.0, 1.0));
        cam.step(1.0);
        assert_eq!(cam.get(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_settled_camera_does_not_move() {
        let mut cam = CameraFollower::new(Vec2::ZERO);
        cam.target(Vec2::new(0.1, 0.1)); // dist2 = 0.02
        cam.step(1.0);
        assert_eq!(cam.get(), Vec2::ZERO);
    }

    #[test]
    fn test_far_target_uses_capped_rate() {
        let mut cam = CameraFollower::new(Vec2::ZERO);
        cam.target(Vec2::new(100.0, 0.0));
        cam.step(1.0);
        let expected = 100.0 * CAMERA_MAX_SPEED * CAMERA_GAIN;
        assert!((cam.get().x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_converges_monotonically() {
        let start = Vec2::new(0.0, 0.0);
        let target = Vec2::new(0.6, -0.3);
        let mut cam = CameraFollower::new(start);
        cam.target(target);

        let mut prev = (target - cam.get()).length_squared();
        assert!(prev < CAMERA_MAX_SPEED);
        let mut steps = 0;
        while prev > CAMERA_SETTLE_DIST2 {
            cam.step(1.0);
            let d = (target - cam.get()).length_squared();
            assert!(d < prev, "distance grew: {prev} -> {d}");
            prev = d;
            steps += 1;
            assert!(steps < 100_000, "never settled");
        }
    }

    #[test]
    fn test_custom_tuning() {
        let mut cam = CameraFollower::with_tuning(Vec2::ZERO, 0.0, 1.0, 1.0);
        cam.target(Vec2::new(0.5, 0.0));
        cam.step(1.0);
        // rate = 0.25, so it moves an eighth of a unit
        assert!((cam.get().x - 0.125).abs() < 1e-6);
    }
}
