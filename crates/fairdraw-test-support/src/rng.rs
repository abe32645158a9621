//! Deterministic `SeededRng` implementations for tests.

use std::sync::{Arc, Mutex, PoisonError};

use fairdraw_core::rng::SeededRng;

/// A no-op RNG that always returns `min` and ignores reseeding. Suitable for
/// tests that do not depend on specific random values.
#[derive(Debug, Default)]
pub struct MockRng;

impl SeededRng for MockRng {
    fn next_i64_range(&mut self, min: i64, _max: i64) -> i64 {
        min
    }

    fn reseed(&mut self, _seed: i64) {}
}

/// Shared record of the seeds a [`SequenceRng`] received.
#[derive(Debug, Clone, Default)]
pub struct SeedLog(Arc<Mutex<Vec<i64>>>);

impl SeedLog {
    /// Seeds received so far, oldest first.
    #[must_use]
    pub fn seeds(&self) -> Vec<i64> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, seed: i64) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(seed);
    }
}

/// An RNG that returns values from a predetermined sequence and records every
/// reseed. Panics if the sequence is exhausted.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<i64>,
    index: usize,
    log: SeedLog,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            index: 0,
            log: SeedLog::default(),
        }
    }

    /// Handle to the seed log; stays valid after the RNG is boxed.
    #[must_use]
    pub fn seed_log(&self) -> SeedLog {
        self.log.clone()
    }
}

impl SeededRng for SequenceRng {
    fn next_i64_range(&mut self, _min: i64, _max: i64) -> i64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    fn reseed(&mut self, seed: i64) {
        self.log.push(seed);
    }
}
