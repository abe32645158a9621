//! Unbiased bounded integers by rejection sampling.
//!
//! A word of [`WORD_SIZE`] random bytes is decoded big-endian, its sign bit
//! is masked off, and the result is reduced into the requested range with a
//! remainder. Draws at or above the largest multiple of the modulus are
//! thrown away first, so every residue is equally likely.

use tracing::trace;

use crate::byte_source::ByteSource;
use crate::error::{Result, RngError};

/// Bytes in a platform word.
pub const WORD_SIZE: usize = std::mem::size_of::<isize>();

/// Largest positive value of a platform word.
#[allow(clippy::cast_possible_truncation)]
pub const MAX_INT: i64 = isize::MAX as i64;

#[allow(clippy::cast_sign_loss)]
const WORD_MASK: u64 = MAX_INT as u64;

/// How a closed range `[min, max]` is turned into a modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanConvention {
    /// Modulus `max - min + 1`; every value of `[min, max]` is reachable.
    #[default]
    Inclusive,
    /// Modulus `max - (min + 1)` with an inclusive ceiling. Results lie in
    /// `[min, max - 2]`; kept for bit-exact compatibility with older
    /// consumers.
    Legacy,
}

/// Acceptance window for one `sample` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    /// The range admits a single value and no draw is needed.
    Constant(i64),
    Reject {
        modulus: u64,
        ceiling: u64,
        ceiling_accepted: bool,
    },
}

/// Maps random words onto a closed integer range without modulo bias.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeSampler {
    convention: SpanConvention,
    iteration_limit: Option<u64>,
}

impl RangeSampler {
    /// Creates a sampler using the given convention and no iteration cap.
    #[must_use]
    pub const fn new(convention: SpanConvention) -> Self {
        Self {
            convention,
            iteration_limit: None,
        }
    }

    /// Caps the number of words drawn per `sample` call.
    #[must_use]
    pub const fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// The span convention in use.
    #[must_use]
    pub const fn convention(&self) -> SpanConvention {
        self.convention
    }

    /// Draws a uniformly distributed integer from `[min, max]`.
    ///
    /// # Errors
    ///
    /// - `RngError::Range` if `min > max` or the span does not fit a
    ///   platform word.
    /// - `RngError::EntropyRead` if the source returns a short word.
    /// - `RngError::IterationLimitExceeded` if a cap is set and reached.
    /// - Any error from the byte source itself.
    pub fn sample(&self, min: i64, max: i64, source: &mut dyn ByteSource) -> Result<i64> {
        let (modulus, ceiling, ceiling_accepted) = match self.window(min, max)? {
            Window::Constant(value) => return Ok(value),
            Window::Reject {
                modulus,
                ceiling,
                ceiling_accepted,
            } => (modulus, ceiling, ceiling_accepted),
        };

        let mut iterations: u64 = 0;
        loop {
            if let Some(limit) = self.iteration_limit {
                if iterations >= limit {
                    return Err(RngError::IterationLimitExceeded(limit));
                }
            }
            iterations += 1;

            let bytes = source.get_bytes(WORD_SIZE)?;
            if bytes.len() < WORD_SIZE {
                return Err(RngError::EntropyRead {
                    expected: WORD_SIZE,
                    actual: bytes.len(),
                });
            }

            let value = decode_word(&bytes) & WORD_MASK;
            let accepted = if ceiling_accepted {
                value <= ceiling
            } else {
                value < ceiling
            };
            if !accepted {
                trace!(value, ceiling, iterations, "draw rejected");
                continue;
            }

            let offset = value % modulus;
            return i64::try_from(i128::from(min) + i128::from(offset))
                .map_err(|_| RngError::Range { min, max });
        }
    }

    fn window(&self, min: i64, max: i64) -> Result<Window> {
        if min > max {
            return Err(RngError::Range { min, max });
        }
        let bad_range = RngError::Range { min, max };

        match self.convention {
            SpanConvention::Inclusive => {
                let width = i128::from(max) - i128::from(min);
                if width > i128::from(MAX_INT) {
                    return Err(bad_range);
                }
                let modulus = u64::try_from(width + 1).map_err(|_| bad_range)?;
                // The masked word takes WORD_MASK + 1 distinct values.
                let values = WORD_MASK + 1;
                Ok(Window::Reject {
                    modulus,
                    ceiling: values / modulus * modulus,
                    ceiling_accepted: false,
                })
            }
            SpanConvention::Legacy => {
                let diff = i128::from(max) - (i128::from(min) + 1);
                if diff > i128::from(MAX_INT) {
                    return Err(bad_range);
                }
                match diff {
                    // min == max: the remainder by -1 is always zero.
                    -1 => Ok(Window::Constant(min)),
                    0 => Err(bad_range),
                    _ => {
                        let modulus = u64::try_from(diff).map_err(|_| bad_range)?;
                        Ok(Window::Reject {
                            modulus,
                            ceiling: WORD_MASK / modulus * modulus,
                            ceiling_accepted: true,
                        })
                    }
                }
            }
        }
    }
}

/// Decodes the first `WORD_SIZE` bytes as a big-endian unsigned integer.
fn decode_word(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[8 - WORD_SIZE..].copy_from_slice(&bytes[..WORD_SIZE]);
    u64::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted reads, one per call.
    struct Script(VecDeque<Vec<u8>>);

    impl Script {
        fn words(words: &[u64]) -> Self {
            Self(
                words
                    .iter()
                    .map(|w| w.to_be_bytes()[8 - WORD_SIZE..].to_vec())
                    .collect(),
            )
        }
    }

    impl ByteSource for Script {
        fn get_bytes(&mut self, _len: usize) -> Result<Vec<u8>> {
            Ok(self.0.pop_front().expect("script exhausted"))
        }
    }

    #[test]
    fn test_decode_word_is_big_endian() {
        let bytes: Vec<u8> = (1..=8).collect();
        let expected = if WORD_SIZE == 8 {
            0x0102_0304_0506_0708
        } else {
            0x0102_0304
        };
        assert_eq!(decode_word(&bytes), expected);
    }

    #[test]
    fn test_decode_matches_two_big_endian_halves() {
        if WORD_SIZE != 8 {
            return;
        }
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x23, 0x45, 0x67];
        let high = u64::from(u32::from_be_bytes([0xde, 0xad, 0xbe, 0xef]));
        let low = u64::from(u32::from_be_bytes([0x01, 0x23, 0x45, 0x67]));
        assert_eq!(decode_word(&bytes), (high << 32) | low);
    }

    #[test]
    fn test_inclusive_reduces_by_span() {
        let sampler = RangeSampler::default();
        let mut source = Script::words(&[17]);
        // span 10, 17 % 10 = 7
        assert_eq!(sampler.sample(100, 109, &mut source).unwrap(), 107);
    }

    #[test]
    fn test_sign_bit_is_masked() {
        let sampler = RangeSampler::default();
        let sign = 1u64 << (WORD_SIZE * 8 - 1);
        let mut source = Script::words(&[sign | 5]);
        assert_eq!(sampler.sample(0, 9, &mut source).unwrap(), 5);
    }

    #[test]
    fn test_inclusive_rejects_tail_then_accepts() {
        let sampler = RangeSampler::default();
        // span 3 does not divide 2^63 (or 2^31), so the all-ones word falls
        // in the rejected tail.
        let mut source = Script::words(&[u64::MAX, 5]);
        assert_eq!(sampler.sample(-1, 1, &mut source).unwrap(), 1);
        assert!(source.0.is_empty());
    }

    #[test]
    fn test_iteration_limit_is_enforced() {
        let sampler = RangeSampler::default().with_iteration_limit(2);
        let mut source = Script::words(&[u64::MAX, u64::MAX, 0]);
        assert_eq!(
            sampler.sample(0, 2, &mut source),
            Err(RngError::IterationLimitExceeded(2))
        );
    }

    #[test]
    fn test_short_read_is_entropy_error() {
        let sampler = RangeSampler::default();
        let mut source = Script(VecDeque::from([vec![1, 2, 3]]));
        assert_eq!(
            sampler.sample(0, 9, &mut source),
            Err(RngError::EntropyRead {
                expected: WORD_SIZE,
                actual: 3
            })
        );
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut source = Script::words(&[]);
        for convention in [SpanConvention::Inclusive, SpanConvention::Legacy] {
            assert_eq!(
                RangeSampler::new(convention).sample(5, 4, &mut source),
                Err(RngError::Range { min: 5, max: 4 })
            );
        }
    }

    #[test]
    fn test_inclusive_accepts_full_word_span() {
        let sampler = RangeSampler::default();
        let mut source = Script::words(&[u64::MAX]);
        assert_eq!(sampler.sample(0, MAX_INT, &mut source).unwrap(), MAX_INT);
    }

    #[test]
    fn test_inclusive_rejects_span_wider_than_word() {
        let sampler = RangeSampler::default();
        let mut source = Script::words(&[]);
        assert!(matches!(
            sampler.sample(-1, MAX_INT, &mut source),
            Err(RngError::Range { .. })
        ));
        assert!(matches!(
            sampler.sample(i64::MIN, i64::MAX, &mut source),
            Err(RngError::Range { .. })
        ));
    }

    #[test]
    fn test_inclusive_single_value_range() {
        let sampler = RangeSampler::default();
        let mut source = Script::words(&[123_456]);
        assert_eq!(sampler.sample(42, 42, &mut source).unwrap(), 42);
    }

    #[test]
    fn test_legacy_uses_shortened_modulus() {
        let sampler = RangeSampler::new(SpanConvention::Legacy);
        // diff = 9 - (0 + 1) = 8, 13 % 8 = 5
        let mut source = Script::words(&[13]);
        assert_eq!(sampler.sample(0, 9, &mut source).unwrap(), 5);
    }

    #[test]
    fn test_legacy_accepts_value_equal_to_ceiling() {
        let sampler = RangeSampler::new(SpanConvention::Legacy);
        // diff = 3; ceiling = floor(mask / 3) * 3
        let ceiling = WORD_MASK / 3 * 3;
        let mut source = Script::words(&[ceiling]);
        assert_eq!(sampler.sample(10, 14, &mut source).unwrap(), 10);
    }

    #[test]
    fn test_legacy_rejects_above_ceiling() {
        let sampler = RangeSampler::new(SpanConvention::Legacy);
        let ceiling = WORD_MASK / 3 * 3;
        let mut source = Script::words(&[ceiling + 1, 4]);
        assert_eq!(sampler.sample(10, 14, &mut source).unwrap(), 11);
    }

    #[test]
    fn test_legacy_degenerate_spans() {
        let sampler = RangeSampler::new(SpanConvention::Legacy);
        let mut source = Script::words(&[]);
        assert_eq!(sampler.sample(7, 7, &mut source).unwrap(), 7);
        assert_eq!(
            sampler.sample(7, 8, &mut source),
            Err(RngError::Range { min: 7, max: 8 })
        );
    }

    #[test]
    fn test_legacy_default_range_is_accepted() {
        let sampler = RangeSampler::new(SpanConvention::Legacy);
        let mut source = Script::words(&[5]);
        assert_eq!(sampler.sample(0, MAX_INT, &mut source).unwrap(), 5);
    }

    #[test]
    fn test_legacy_rejects_span_wider_than_word() {
        let sampler = RangeSampler::new(SpanConvention::Legacy);
        let mut source = Script::words(&[]);
        assert_eq!(
            sampler.sample(i64::MIN, i64::MAX, &mut source),
            Err(RngError::Range {
                min: i64::MIN,
                max: i64::MAX,
            })
        );
        // diff = MAX_INT + 1
        assert_eq!(
            sampler.sample(-2, MAX_INT, &mut source),
            Err(RngError::Range {
                min: -2,
                max: MAX_INT,
            })
        );
    }
}
