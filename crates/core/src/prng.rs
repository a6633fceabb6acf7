//! Seedable Xorshift64 generator used to lay out the initial source population.
//!
//! Same seed, same population, on every platform: the state update is
//! pure integer arithmetic and floats are derived from the top bits only.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is the all-zeros fixed point of xorshift and is replaced
/// with [`Xorshift64::FALLBACK_SEED`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Replacement for a zero seed.
    pub const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns it.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f32 in [0, 1), built from the upper 24 bits so every value
    /// is exactly representable.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Uniform f32 in [min, max). Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        let t = self.next_f32();
        if max <= min {
            return min;
        }
        let v = min + t * (max - min);
        // f32 rounding can land exactly on `max`.
        if v < max {
            v
        } else {
            min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_matches_golden_value_for_seed_42() {
        // Changing this breaks every seeded population in saved configs.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn zero_seed_uses_fallback() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        let first = zero.next_u64();
        assert_ne!(first, 0);
        assert_eq!(first, fallback.next_u64());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(2024);
        let mut b = Xorshift64::new(2024);
        for i in 0..500 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits(), "diverged at {i}");
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = Xorshift64::new(3);
        assert_eq!(rng.next_range(12.0, 12.0), 12.0);
        assert_eq!(rng.next_range(5.0, 1.0), 5.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f32_in_unit_interval(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..200 {
                    let v = rng.next_f32();
                    prop_assert!((0.0..1.0).contains(&v), "next_f32() = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_range_stays_half_open(
                seed: u64,
                min in -1000.0_f32..1000.0,
                width in 0.001_f32..500.0,
            ) {
                let max = min + width;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..200 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "next_range({min}, {max}) = {v}");
                }
            }
        }
    }
}
