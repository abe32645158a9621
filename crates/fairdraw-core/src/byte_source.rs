//! Cryptographically strong byte source.

use tracing::debug;

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{Result, RngError};

/// Source of random bytes consumed by the range sampler.
pub trait ByteSource {
    /// Produce `len` random bytes.
    ///
    /// Implementations may return fewer bytes than requested; the caller
    /// decides whether a short read is fatal.
    ///
    /// # Errors
    ///
    /// Returns `RngError::WeakRandomness` if the source fails or cannot vouch
    /// for the strength of its output.
    fn get_bytes(&mut self, len: usize) -> Result<Vec<u8>>;
}

/// Byte source that only hands out output its entropy source calls strong.
///
/// Every call records the source's strength verdict, including calls that
/// end in an error.
#[derive(Debug, Default)]
pub struct CryptoByteSource<E = OsEntropy> {
    entropy: E,
    last_strength: Option<bool>,
}

impl<E: EntropySource> CryptoByteSource<E> {
    /// Wraps an entropy source.
    #[must_use]
    pub fn new(entropy: E) -> Self {
        Self {
            entropy,
            last_strength: None,
        }
    }

    /// Strength flag of the latest read, or `None` before the first read.
    #[must_use]
    pub fn last_strength(&self) -> Option<bool> {
        self.last_strength
    }
}

impl<E: EntropySource> ByteSource for CryptoByteSource<E> {
    fn get_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let raw = match self.entropy.read(len) {
            Ok(raw) => raw,
            Err(reason) => {
                debug!(len, %reason, "entropy read failed");
                self.last_strength = Some(false);
                return Err(RngError::WeakRandomness(reason));
            }
        };

        self.last_strength = Some(raw.strong);

        if raw.bytes.is_empty() {
            debug!(len, strong = raw.strong, "entropy source returned no bytes");
            return Err(RngError::WeakRandomness(
                "entropy source returned no bytes".to_owned(),
            ));
        }
        if !raw.strong {
            debug!(len, actual = raw.bytes.len(), "entropy output not strong");
            return Err(RngError::WeakRandomness(
                "entropy source reported output as not cryptographically strong".to_owned(),
            ));
        }

        Ok(raw.bytes)
    }
}
