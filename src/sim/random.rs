//! Random source capability
//!
//! The simulation only ever asks for uniform floats; hosts may supply any
//! source, `SeededRandom` is the deterministic default.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random numbers in `[min, max)`
pub trait RandomSource {
    fn uniform(&mut self, min: f64, max: f64) -> f64;
}

/// PCG32-backed source; the same seed always yields the same sequence
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if !(min < max && min.is_finite() && max.is_finite()) {
            return min;
        }
        self.rng.random_range(min..max)
    }
}
