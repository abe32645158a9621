//! Error types for random generation.

use thiserror::Error;

/// Result alias used throughout `fairdraw-core`.
pub type Result<T> = std::result::Result<T, RngError>;

/// Top-level error type for every generator operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// The mode is not one of the supported modes.
    #[error("mode not supported: {0} (supported: platform=1, mersenne-twister=2, crypto=8)")]
    InvalidMode(String),

    /// The seed value is not an integer.
    #[error("seed must be an integer, got {0:?}")]
    InvalidSeedType(String),

    /// The requested range is empty or wider than a platform word.
    #[error("bad range [{min}, {max}]")]
    Range {
        /// Lower bound as requested.
        min: i64,
        /// Upper bound as requested.
        max: i64,
    },

    /// The byte source returned fewer bytes than a word requires.
    #[error("failed to read {expected} bytes from entropy source, got {actual}")]
    EntropyRead {
        /// Bytes requested.
        expected: usize,
        /// Bytes returned.
        actual: usize,
    },

    /// The byte source failed or reported output that is not
    /// cryptographically strong.
    #[error("weak randomness: {0}")]
    WeakRandomness(String),

    /// The sampler hit its configured iteration cap without accepting a draw.
    #[error("no draw accepted within {0} iterations")]
    IterationLimitExceeded(u64),

    /// A configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_range() {
        let err = RngError::Range { min: 5, max: 1 };
        assert_eq!(err.to_string(), "bad range [5, 1]");
    }

    #[test]
    fn test_display_entropy_read() {
        let err = RngError::EntropyRead {
            expected: 8,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "failed to read 8 bytes from entropy source, got 3"
        );
    }

    #[test]
    fn test_display_invalid_seed_type_quotes_input() {
        let err = RngError::InvalidSeedType("Foo".to_owned());
        assert_eq!(err.to_string(), "seed must be an integer, got \"Foo\"");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            RngError::IterationLimitExceeded(3),
            RngError::IterationLimitExceeded(3)
        );
        assert_ne!(
            RngError::WeakRandomness("a".to_owned()),
            RngError::Config("a".to_owned())
        );
    }
}
