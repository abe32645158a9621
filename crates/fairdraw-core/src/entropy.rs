//! Raw entropy sources.
//!
//! An entropy source is the host primitive below the byte source: it hands
//! back whatever bytes it produced together with its own verdict on their
//! strength. Judging that verdict is left to [`crate::byte_source`].

use rand::TryRngCore;
use rand::rngs::OsRng;

/// Bytes produced by an entropy source and its self-reported strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBytes {
    /// The bytes read. May be shorter than requested.
    pub bytes: Vec<u8>,
    /// Whether the source considers the bytes cryptographically strong.
    pub strong: bool,
}

/// Abstraction over a host entropy primitive.
pub trait EntropySource: Send + Sync {
    /// Read up to `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when the source cannot
    /// produce any output at all.
    fn read(&mut self, len: usize) -> Result<RawBytes, String>;
}

/// Production entropy source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn read(&mut self, len: usize) -> Result<RawBytes, String> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| format!("OS entropy unavailable: {e}"))?;
        Ok(RawBytes {
            bytes,
            strong: true,
        })
    }
}
