//! Clock abstraction and clock-derived seeds.

use chrono::{DateTime, Utc};

/// Constant added to every clock-derived seed.
const SEED_OFFSET: i64 = 13;

/// Source of the wall-clock readings that [`seed_from_time`] turns into
/// seeds for `Generator::generate_seed`.
pub trait Clock: Send + Sync {
    /// Returns the instant a seed should be derived from.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads `Utc::now()`, so successive seeds differ once the microsecond
/// digit moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Derives a seed from a point in time.
///
/// The seed is the Unix seconds plus the decimal digits of the microsecond
/// component read backwards, plus a fixed offset. Reversing the digits puts
/// the fastest-moving digit in the most significant place.
#[must_use]
pub fn seed_from_time(at: DateTime<Utc>) -> i64 {
    let micros = at.timestamp_subsec_micros() % 1_000_000;
    at.timestamp()
        .wrapping_add(reverse_digits(micros))
        .wrapping_add(SEED_OFFSET)
}

fn reverse_digits(mut n: u32) -> i64 {
    let mut reversed: i64 = 0;
    while n > 0 {
        reversed = reversed * 10 + i64::from(n % 10);
        n /= 10;
    }
    reversed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, micros: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, micros * 1_000).unwrap()
    }

    #[test]
    fn test_reverse_digits() {
        assert_eq!(reverse_digits(0), 0);
        assert_eq!(reverse_digits(123_456), 654_321);
        assert_eq!(reverse_digits(120), 21);
        assert_eq!(reverse_digits(7), 7);
    }

    #[test]
    fn test_seed_from_time_formula() {
        assert_eq!(
            seed_from_time(at(1_700_000_000, 123_456)),
            1_700_000_000 + 654_321 + 13
        );
        assert_eq!(seed_from_time(at(0, 0)), 13);
    }

    #[test]
    fn test_seed_changes_with_one_microsecond() {
        let a = seed_from_time(at(1_700_000_000, 500_000));
        let b = seed_from_time(at(1_700_000_000, 500_001));
        assert_ne!(a, b);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now().timestamp() > 0);
    }
}
