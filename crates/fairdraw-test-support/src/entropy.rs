//! Scripted `EntropySource` implementations.

use std::collections::VecDeque;

use fairdraw_core::entropy::{EntropySource, RawBytes};
use fairdraw_core::sampler::WORD_SIZE;

/// Encodes `word` as the big-endian platform word the sampler decodes.
#[must_use]
pub fn word_bytes(word: u64) -> Vec<u8> {
    word.to_be_bytes()[8 - WORD_SIZE..].to_vec()
}

/// Replays scripted reads in order, ignoring the requested length. Panics if
/// the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedEntropy {
    reads: VecDeque<RawBytes>,
}

impl ScriptedEntropy {
    /// Script arbitrary reads.
    #[must_use]
    pub fn new(reads: Vec<RawBytes>) -> Self {
        Self {
            reads: reads.into(),
        }
    }

    /// Script one strong word per read.
    #[must_use]
    pub fn words(words: &[u64]) -> Self {
        Self::new(
            words
                .iter()
                .map(|w| RawBytes {
                    bytes: word_bytes(*w),
                    strong: true,
                })
                .collect(),
        )
    }

    /// Reads left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.reads.len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn read(&mut self, _len: usize) -> Result<RawBytes, String> {
        Ok(self.reads.pop_front().expect("entropy script exhausted"))
    }
}

/// Returns the requested number of zero bytes flagged as weak.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeakEntropy;

impl EntropySource for WeakEntropy {
    fn read(&mut self, len: usize) -> Result<RawBytes, String> {
        Ok(RawBytes {
            bytes: vec![0; len],
            strong: false,
        })
    }
}

/// Always fails with the given reason.
#[derive(Debug, Clone)]
pub struct FailingEntropy(pub String);

impl EntropySource for FailingEntropy {
    fn read(&mut self, _len: usize) -> Result<RawBytes, String> {
        Err(self.0.clone())
    }
}
