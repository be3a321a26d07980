//! Lookup-table trigonometry
//!
//! Motion and shape code evaluates sin/cos through a coarse table rather than
//! the system functions, so every caller sees the same quantized angles.
//! With 40 samples per turn each bin covers 9 degrees.

use std::f32::consts::TAU;
use std::sync::OnceLock;

use crate::consts::TRIG_TABLE_SIZE;

static GLOBAL: OnceLock<TrigTable> = OnceLock::new();

/// Precomputed sine and cosine samples over one full turn
#[derive(Debug, Clone)]
pub struct TrigTable {
    sin: [f32; TRIG_TABLE_SIZE],
    cos: [f32; TRIG_TABLE_SIZE],
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TrigTable {
    /// Build a fresh table
    pub fn new() -> Self {
        let sample = |i: usize| i as f32 * TAU / TRIG_TABLE_SIZE as f32;
        Self {
            sin: std::array::from_fn(|i| sample(i).sin()),
            cos: std::array::from_fn(|i| sample(i).cos()),
        }
    }

    /// Process-wide table, built on first use.
    ///
    /// Concurrent first callers block until the single initialization
    /// finishes; every caller observes the same table.
    pub fn global() -> &'static TrigTable {
        GLOBAL.get_or_init(|| {
            log::debug!("Building {TRIG_TABLE_SIZE}-sample trig table");
            TrigTable::new()
        })
    }

    /// Table bin for any real angle
    #[inline]
    fn index(rad: f32) -> usize {
        let turns = rad / TAU;
        let scaled = (turns - turns.floor()) * TRIG_TABLE_SIZE as f32;
        (scaled as usize).min(TRIG_TABLE_SIZE - 1)
    }

    /// Table bin for an angle already in [0, 2π)
    #[inline]
    fn index_fast(rad: f32) -> usize {
        debug_assert!((0.0..=TAU).contains(&rad), "angle not normalized: {rad}");
        ((rad * TRIG_TABLE_SIZE as f32 / TAU) as usize).min(TRIG_TABLE_SIZE - 1)
    }

    /// Sine of any angle in radians
    #[inline]
    pub fn sin(&self, rad: f32) -> f32 {
        self.sin[Self::index(rad)]
    }

    /// Cosine of any angle in radians
    #[inline]
    pub fn cos(&self, rad: f32) -> f32 {
        self.cos[Self::index(rad)]
    }

    /// Sine and cosine sharing one reduction
    #[inline]
    pub fn sin_cos(&self, rad: f32) -> (f32, f32) {
        let i = Self::index(rad);
        (self.sin[i], self.cos[i])
    }

    /// Sine of an angle the caller already reduced to [0, 2π)
    #[inline]
    pub fn sin_fast(&self, rad: f32) -> f32 {
        self.sin[Self::index_fast(rad)]
    }

    /// Cosine of an angle the caller already reduced to [0, 2π)
    #[inline]
    pub fn cos_fast(&self, rad: f32) -> f32 {
        self.cos[Self::index_fast(rad)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const BIN: f32 = TAU / TRIG_TABLE_SIZE as f32;

    #[test]
    fn test_cardinal_angles() {
        let t = TrigTable::new();
        assert!(t.sin(0.0).abs() < 1e-6);
        assert!((t.cos(0.0) - 1.0).abs() < 1e-6);
        assert!((t.sin(FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!((t.cos(PI) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_samples_at_bin_starts() {
        let t = TrigTable::new();
        for i in 0..TRIG_TABLE_SIZE {
            let angle = i as f32 * TAU / TRIG_TABLE_SIZE as f32;
            assert_eq!(t.sin[i], angle.sin());
            assert_eq!(t.cos[i], angle.cos());
        }
    }

    #[test]
    fn test_quantized_to_bins() {
        let t = TrigTable::new();
        // Anywhere inside the first bin reads sample 0
        assert_eq!(t.sin(BIN * 0.9), t.sin(0.0));
        assert_ne!(t.sin(BIN * 1.1), t.sin(0.0));
    }

    #[test]
    fn test_negative_angles_wrap() {
        let t = TrigTable::new();
        let a = -0.5 * BIN;
        assert_eq!(t.sin(a), t.sin(TAU + a));
        assert_eq!(t.cos(a), t.cos(TAU + a));
    }

    #[test]
    fn test_fast_matches_normalizing_in_range() {
        let t = TrigTable::new();
        for i in 0..TRIG_TABLE_SIZE {
            let a = (i as f32 + 0.5) * BIN;
            assert_eq!(t.sin_fast(a), t.sin(a));
            assert_eq!(t.cos_fast(a), t.cos(a));
        }
    }

    #[test]
    fn test_fast_upper_edge_stays_in_bounds() {
        let t = TrigTable::new();
        assert_eq!(t.sin_fast(TAU), t.sin_fast(TAU - BIN * 0.5));
    }

    #[test]
    fn test_global_is_shared() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| TrigTable::global() as *const TrigTable as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    proptest! {
        #[test]
        fn prop_periodic(bin in 0usize..TRIG_TABLE_SIZE, frac in 0.1f32..0.9, k in -8i32..8) {
            let t = TrigTable::new();
            let x = (bin as f32 + frac) * BIN;
            let shifted = x + TAU * k as f32;
            prop_assert_eq!(t.sin(x), t.sin(shifted));
            prop_assert_eq!(t.cos(x), t.cos(shifted));
        }
    }
}
