//! Seedable PRNG backends and the context that owns their state.
//!
//! Each generator owns a [`PrngContext`], so seeding one generator never
//! perturbs another. Both backends delegate range generation to `rand`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_mt::Mt64;

/// Abstraction over a seedable range generator.
pub trait SeededRng: Send + Sync {
    /// Generate a random `i64` in the range `[min, max]` inclusive.
    ///
    /// Callers guarantee `min <= max`.
    fn next_i64_range(&mut self, min: i64, max: i64) -> i64;

    /// Reset the generator state from `seed`.
    fn reseed(&mut self, seed: i64);
}

/// Reinterprets the seed bits as unsigned.
fn seed_bits(seed: i64) -> u64 {
    u64::from_ne_bytes(seed.to_ne_bytes())
}

/// The platform's general-purpose PRNG (`StdRng`).
#[derive(Debug, Clone)]
pub struct PlatformPrng(StdRng);

impl PlatformPrng {
    /// Creates a generator with a fixed seed.
    #[must_use]
    pub fn seeded(seed: i64) -> Self {
        Self(StdRng::seed_from_u64(seed_bits(seed)))
    }

    /// Creates a generator seeded from the thread-local CSPRNG.
    #[must_use]
    pub fn unseeded() -> Self {
        Self(StdRng::from_rng(&mut rand::rng()))
    }
}

impl SeededRng for PlatformPrng {
    fn next_i64_range(&mut self, min: i64, max: i64) -> i64 {
        self.0.random_range(min..=max)
    }

    fn reseed(&mut self, seed: i64) {
        self.0 = StdRng::seed_from_u64(seed_bits(seed));
    }
}

/// 64-bit Mersenne Twister (MT19937-64).
#[derive(Clone)]
pub struct MersennePrng(Mt64);

impl MersennePrng {
    /// Creates a generator with a fixed seed.
    #[must_use]
    pub fn seeded(seed: i64) -> Self {
        Self(Mt64::new(seed_bits(seed)))
    }

    /// Creates a generator seeded from the thread-local CSPRNG.
    #[must_use]
    pub fn unseeded() -> Self {
        Self(Mt64::new(rand::rng().random::<u64>()))
    }
}

impl fmt::Debug for MersennePrng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MersennePrng").finish_non_exhaustive()
    }
}

impl SeededRng for MersennePrng {
    fn next_i64_range(&mut self, min: i64, max: i64) -> i64 {
        self.0.random_range(min..=max)
    }

    fn reseed(&mut self, seed: i64) {
        self.0 = Mt64::new(seed_bits(seed));
    }
}

/// PRNG state for the seedable modes of one generator.
pub struct PrngContext {
    /// Backend for `Mode::PlatformDefault`.
    pub platform: Box<dyn SeededRng>,
    /// Backend for `Mode::MersenneTwister`.
    pub mersenne: Box<dyn SeededRng>,
}

impl PrngContext {
    /// Creates a context from explicit backends.
    #[must_use]
    pub fn new(platform: Box<dyn SeededRng>, mersenne: Box<dyn SeededRng>) -> Self {
        Self { platform, mersenne }
    }
}

impl Default for PrngContext {
    fn default() -> Self {
        Self::new(
            Box::new(PlatformPrng::unseeded()),
            Box::new(MersennePrng::unseeded()),
        )
    }
}

impl fmt::Debug for PrngContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrngContext").finish_non_exhaustive()
    }
}
