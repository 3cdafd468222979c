//! # Randomness
//!
//! Every probabilistic subsystem draws through [`RandomSource`] instead of a
//! global RNG, so a run can be replayed exactly from a seed and tests can
//! script each draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{SanctumError, SanctumResult};

/// Injectable source of uniform randomness.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer draw in the inclusive range `[low, high]`.
    fn int_in_range(&mut self, low: i32, high: i32) -> i32;

    /// Uniform index draw in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Production random source backed by a seedable [`StdRng`].
///
/// # Examples
///
/// ```
/// use sanctum::{RandomSource, SeededRandom};
///
/// let mut a = SeededRandom::new(42);
/// let mut b = SeededRandom::new(42);
/// assert_eq!(a.int_in_range(1, 100), b.int_in_range(1, 100));
/// ```
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a random source replayable from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a random source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn int_in_range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Selects one option from weighted `(value, weight)` pairs.
///
/// The draw walks the options in order and returns the first whose cumulative
/// weight reaches the scaled unit draw. List order is significant: it decides
/// which option absorbs boundary draws, so callers keep their bucket order
/// fixed. Weights need not sum to 1, and a non-positive total falls back to
/// the last option.
///
/// # Examples
///
/// ```
/// use sanctum::{pick_weighted, SeededRandom};
///
/// let buckets = [("common", 10.0), ("rare", 1.0)];
/// let mut rng = SeededRandom::new(7);
/// let picked = pick_weighted(&buckets, &mut rng).unwrap();
/// assert!(buckets.iter().any(|(label, _)| *label == picked.0));
/// ```
pub fn pick_weighted<'a, T>(
    options: &'a [(T, f64)],
    rng: &mut dyn RandomSource,
) -> SanctumResult<&'a (T, f64)> {
    let last = options.last().ok_or_else(|| {
        SanctumError::InvalidState("weighted selection over empty options".to_string())
    })?;
    let total: f64 = options.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return Ok(last);
    }
    let threshold = rng.next_unit() * total;
    let mut cumulative = 0.0;
    for option in options {
        cumulative += option.1;
        if threshold <= cumulative {
            return Ok(option);
        }
    }
    // Floating-point accumulation can land a hair past the final band.
    Ok(last)
}
