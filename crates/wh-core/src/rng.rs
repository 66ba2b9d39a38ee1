//! Deterministic simulation-level RNG.
//!
//! The coordination core itself is fully deterministic; randomness is only
//! used to generate layouts (vehicle start positions and headings).  The
//! same seed always yields the same layout.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for layout generation.
///
/// Used only in single-threaded set-up code.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
