//! Interchangeable random backends behind one interface.
//!
//! A [`Generator`] produces integers in a closed range and raw bytes. The
//! seedable modes use `StdRng` or a 64-bit Mersenne Twister. The default
//! `Mode::CryptoStrong` maps OS entropy onto the range by rejection sampling.
//!
//! ```
//! use fairdraw_core::{Generator, Mode};
//!
//! let mut generator = Generator::new(Mode::CryptoStrong, None);
//! let roll = generator.generate(1, 6).unwrap();
//! assert!((1..=6).contains(&roll));
//! assert_eq!(generator.cryptographic_strong(), Some(true));
//! ```

pub mod byte_source;
pub mod clock;
pub mod config;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod mode;
pub mod rng;
pub mod sampler;

pub use byte_source::{ByteSource, CryptoByteSource};
pub use clock::{Clock, SystemClock};
pub use config::GeneratorConfig;
pub use entropy::{EntropySource, OsEntropy, RawBytes};
pub use error::{Result, RngError};
pub use generator::{Generator, GeneratorBuilder};
pub use mode::Mode;
pub use rng::{MersennePrng, PlatformPrng, PrngContext, SeededRng};
pub use sampler::{MAX_INT, RangeSampler, SpanConvention, WORD_SIZE};
