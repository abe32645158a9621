//! Clocks that make `Generator::generate_seed` reproducible in tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use fairdraw_core::clock::Clock;

/// A clock pinned to one instant, so every derived seed is the same.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock that starts at a fixed point and advances by `step` after every
/// reading. A one-microsecond step changes the reversed-digit part of each
/// derived seed.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    /// Create a clock whose first reading is `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self
            .next
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let reading = *next;
        *next = reading + self.step;
        reading
    }
}
