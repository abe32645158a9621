//! Shared test doubles for fairdraw.

mod clock;
mod entropy;
mod rng;

pub use clock::{FixedClock, SteppingClock};
pub use entropy::{FailingEntropy, ScriptedEntropy, WeakEntropy, word_bytes};
pub use rng::{MockRng, SeedLog, SequenceRng};
