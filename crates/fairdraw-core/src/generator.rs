//! Generator facade: mode and seed state plus dispatch to the backends.

use std::fmt;

use rand::RngCore;
use tracing::{debug, instrument};

use crate::byte_source::{ByteSource, CryptoByteSource};
use crate::clock::{self, Clock, SystemClock};
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{Result, RngError};
use crate::mode::Mode;
use crate::rng::PrngContext;
use crate::sampler::{MAX_INT, RangeSampler};

/// Random integer and byte generator with a selectable backend.
///
/// A generator is not internally synchronised. Share one across threads
/// behind a `Mutex`.
pub struct Generator<E = OsEntropy> {
    mode: Mode,
    seed: Option<i64>,
    bytes: CryptoByteSource<E>,
    sampler: RangeSampler,
    prngs: PrngContext,
    clock: Box<dyn Clock>,
}

impl Generator<OsEntropy> {
    /// Creates a generator and applies `seed` to the PRNG of `mode`.
    #[must_use]
    pub fn new(mode: Mode, seed: Option<i64>) -> Self {
        let mut builder = GeneratorBuilder::new().mode(mode);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    /// Creates a generator from a numeric mode code.
    ///
    /// # Errors
    ///
    /// Returns `RngError::InvalidMode` if `code` is not a supported mode.
    pub fn with_mode_code(code: i64, seed: Option<i64>) -> Result<Self> {
        Ok(Self::new(Mode::try_from(code)?, seed))
    }

    /// Starts building a generator.
    #[must_use]
    pub fn builder() -> GeneratorBuilder<OsEntropy> {
        GeneratorBuilder::new()
    }
}

impl Default for Generator<OsEntropy> {
    fn default() -> Self {
        Self::new(Mode::default(), None)
    }
}

impl<E: EntropySource> Generator<E> {
    /// Generates an integer in `[min, max]` using the current mode.
    ///
    /// # Errors
    ///
    /// Returns `RngError::Range` if `min > max` in any mode. In
    /// `Mode::CryptoStrong` also returns any error of the range sampler or
    /// byte source; there is no fallback to a weaker mode.
    #[instrument(level = "trace", skip(self), fields(mode = %self.mode))]
    pub fn generate(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(RngError::Range { min, max });
        }
        match self.mode {
            Mode::CryptoStrong => self.sampler.sample(min, max, &mut self.bytes),
            Mode::MersenneTwister => Ok(self.prngs.mersenne.next_i64_range(min, max)),
            Mode::PlatformDefault => Ok(self.prngs.platform.next_i64_range(min, max)),
        }
    }

    /// Generates an integer in `[0, MAX_INT]`.
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_default(&mut self) -> Result<i64> {
        self.generate(0, MAX_INT)
    }

    /// Derives a seed from the generator's clock. The generator itself is
    /// not reseeded.
    #[must_use]
    pub fn generate_seed(&self) -> i64 {
        clock::seed_from_time(self.clock.now())
    }

    /// Returns `len` random bytes.
    ///
    /// With `Some(Mode::CryptoStrong)` the bytes come from the byte source
    /// and its strength verdict is recorded. Otherwise they come from the
    /// thread-local CSPRNG, which is never affected by `set_seed`.
    ///
    /// # Errors
    ///
    /// Returns `RngError::WeakRandomness` if the crypto byte source fails,
    /// and `RngError::EntropyRead` if it returns fewer than `len` bytes.
    pub fn random_bytes(&mut self, len: usize, source: Option<Mode>) -> Result<Vec<u8>> {
        if source == Some(Mode::CryptoStrong) {
            let bytes = self.bytes.get_bytes(len)?;
            if bytes.len() != len {
                return Err(RngError::EntropyRead {
                    expected: len,
                    actual: bytes.len(),
                });
            }
            return Ok(bytes);
        }

        let mut bytes = vec![0u8; len];
        rand::rng().fill_bytes(&mut bytes);
        Ok(bytes)
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches the active mode. The PRNG of the new mode is not reseeded.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
    }

    /// Switches the active mode by numeric code.
    ///
    /// # Errors
    ///
    /// Returns `RngError::InvalidMode` if `code` is not a supported mode; the
    /// current mode is kept.
    pub fn set_mode_code(&mut self, code: i64) -> Result<()> {
        let mode = Mode::try_from(code)?;
        self.set_mode(mode);
        Ok(())
    }

    /// The seed last set, if any.
    #[must_use]
    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    /// Stores `seed` and reseeds the PRNG of the current mode.
    ///
    /// In `Mode::CryptoStrong` the seed is only stored.
    pub fn set_seed(&mut self, seed: i64) {
        match self.mode {
            Mode::MersenneTwister => self.prngs.mersenne.reseed(seed),
            Mode::PlatformDefault => self.prngs.platform.reseed(seed),
            Mode::CryptoStrong => {}
        }
        debug!(mode = %self.mode, seed, reseeded = self.mode.is_seedable(), "seed set");
        self.seed = Some(seed);
    }

    /// Parses `raw` as an integer seed and applies it with [`Generator::set_seed`].
    ///
    /// # Errors
    ///
    /// Returns `RngError::InvalidSeedType` if `raw` is not an integer literal.
    /// No trimming or numeric coercion is performed.
    pub fn set_seed_str(&mut self, raw: &str) -> Result<()> {
        let seed = raw
            .parse::<i64>()
            .map_err(|_| RngError::InvalidSeedType(raw.to_owned()))?;
        self.set_seed(seed);
        Ok(())
    }

    /// Strength verdict of the last crypto byte source read, or `None` if
    /// the byte source has not been used yet.
    #[must_use]
    pub fn cryptographic_strong(&self) -> Option<bool> {
        self.bytes.last_strength()
    }

    /// The range sampler used in `Mode::CryptoStrong`.
    #[must_use]
    pub fn sampler(&self) -> &RangeSampler {
        &self.sampler
    }
}

impl<E> fmt::Debug for Generator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("mode", &self.mode)
            .field("seed", &self.seed)
            .field("sampler", &self.sampler)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Generator`].
pub struct GeneratorBuilder<E = OsEntropy> {
    mode: Mode,
    seed: Option<i64>,
    entropy: E,
    sampler: RangeSampler,
    prngs: Option<PrngContext>,
    clock: Option<Box<dyn Clock>>,
}

impl GeneratorBuilder<OsEntropy> {
    /// Creates a builder for a crypto-strong generator over OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::default(),
            seed: None,
            entropy: OsEntropy,
            sampler: RangeSampler::default(),
            prngs: None,
            clock: None,
        }
    }
}

impl Default for GeneratorBuilder<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> GeneratorBuilder<E> {
    /// Sets the initial mode.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets a seed, applied to the initial mode's PRNG on `build`.
    #[must_use]
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the entropy source behind the crypto byte source.
    #[must_use]
    pub fn entropy<F: EntropySource>(self, entropy: F) -> GeneratorBuilder<F> {
        GeneratorBuilder {
            mode: self.mode,
            seed: self.seed,
            entropy,
            sampler: self.sampler,
            prngs: self.prngs,
            clock: self.clock,
        }
    }

    /// Replaces the range sampler.
    #[must_use]
    pub fn sampler(mut self, sampler: RangeSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Replaces the PRNG context.
    #[must_use]
    pub fn prngs(mut self, prngs: PrngContext) -> Self {
        self.prngs = Some(prngs);
        self
    }

    /// Replaces the clock used by `generate_seed`.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> Generator<E> {
        let mut generator = Generator {
            mode: self.mode,
            seed: None,
            bytes: CryptoByteSource::new(self.entropy),
            sampler: self.sampler,
            prngs: self.prngs.unwrap_or_default(),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        };
        if let Some(seed) = self.seed {
            generator.set_seed(seed);
        }
        generator
    }
}

impl<E> fmt::Debug for GeneratorBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorBuilder")
            .field("mode", &self.mode)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_crypto_without_seed() {
        let generator = Generator::default();
        assert_eq!(generator.mode(), Mode::CryptoStrong);
        assert_eq!(generator.seed(), None);
        assert_eq!(generator.cryptographic_strong(), None);
    }

    #[test]
    fn test_seed_is_retained_in_every_mode() {
        for mode in Mode::ALL {
            let generator = Generator::new(mode, Some(123_456));
            assert_eq!(generator.seed(), Some(123_456), "mode {mode}");
        }
    }

    #[test]
    fn test_invalid_mode_code_is_rejected() {
        assert!(matches!(
            Generator::with_mode_code(i64::MAX, None),
            Err(RngError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_set_mode_code_keeps_mode_on_error() {
        let mut generator = Generator::new(Mode::MersenneTwister, None);
        assert!(generator.set_mode_code(4096).is_err());
        assert_eq!(generator.mode(), Mode::MersenneTwister);
        generator.set_mode_code(1).unwrap();
        assert_eq!(generator.mode(), Mode::PlatformDefault);
    }

    #[test]
    fn test_set_seed_str_rejects_non_integers() {
        let mut generator = Generator::default();
        for raw in ["not-an-integer", "12.0", " 12", "0x10", ""] {
            assert_eq!(
                generator.set_seed_str(raw),
                Err(RngError::InvalidSeedType(raw.to_owned()))
            );
        }
        assert_eq!(generator.seed(), None);
        generator.set_seed_str("-42").unwrap();
        assert_eq!(generator.seed(), Some(-42));
    }

    #[test]
    fn test_crypto_generate_records_strength() {
        let mut generator = Generator::default();
        let value = generator.generate(1, 10).unwrap();
        assert!((1..=10).contains(&value));
        assert_eq!(generator.cryptographic_strong(), Some(true));
    }

    #[test]
    fn test_inverted_range_is_rejected_in_every_mode() {
        for mode in Mode::ALL {
            let mut generator = Generator::new(mode, None);
            assert_eq!(
                generator.generate(10, 1),
                Err(RngError::Range { min: 10, max: 1 })
            );
        }
    }

    #[test]
    fn test_default_bytes_path_does_not_touch_crypto_source() {
        let mut generator = Generator::default();
        assert_eq!(generator.random_bytes(4096, None).unwrap().len(), 4096);
        assert_eq!(generator.cryptographic_strong(), None);
        assert_eq!(
            generator
                .random_bytes(4096, Some(Mode::CryptoStrong))
                .unwrap()
                .len(),
            4096
        );
        assert_eq!(generator.cryptographic_strong(), Some(true));
    }
}
