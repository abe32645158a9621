//! Subcommand implementations.

use std::collections::BTreeSet;
use std::io::Write;

use fairdraw_core::{EntropySource, Generator, GeneratorConfig, MAX_INT, Mode};
use serde::Serialize;
use tracing::info;

use crate::cli::Command;
use crate::error::CliError;

/// Range used by `demo`.
const DEMO_RANGE: (i64, i64) = (1, 10);

/// Modes `demo` draws from, strongest first.
const DEMO_ORDER: [Mode; 3] = [
    Mode::CryptoStrong,
    Mode::PlatformDefault,
    Mode::MersenneTwister,
];

/// Runs `command`, writing results to `out`.
///
/// `config` supplies the mode and seed when the command does not override
/// them.
///
/// # Errors
///
/// Returns `CliError` if generation fails or `out` cannot be written.
pub fn run(command: Command, config: GeneratorConfig, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Demo => demo(out),
        Command::Draw {
            min,
            max,
            count,
            mode,
            seed,
        } => {
            let mut generator = Generator::new(mode.unwrap_or(config.mode), config.seed);
            if let Some(raw) = seed {
                generator.set_seed_str(&raw)?;
            }
            draw(&mut generator, min, max.unwrap_or(MAX_INT), count, out)
        }
        Command::Bytes { len, crypto } => {
            let mut generator = config.build();
            let source = crypto.then_some(Mode::CryptoStrong);
            let bytes = generator.random_bytes(len, source)?;
            writeln!(out, "{}", hex::encode(&bytes))?;
            Ok(())
        }
        Command::Seed => {
            writeln!(out, "{}", Generator::default().generate_seed())?;
            Ok(())
        }
        Command::Walk { iterations, width } => {
            for mode in Mode::ALL {
                let mut generator = Generator::new(mode, None);
                let summary = walk(&mut generator, iterations, width)?;
                writeln!(out, "{}", serde_json::to_string(&summary)?)?;
            }
            Ok(())
        }
    }
}

/// Prints one integer from [`DEMO_RANGE`] per mode, in [`DEMO_ORDER`].
fn demo(out: &mut dyn Write) -> Result<(), CliError> {
    let generators = DEMO_ORDER.map(|mode| Generator::new(mode, None));
    demo_with(generators, out)
}

fn demo_with<E: EntropySource>(
    generators: impl IntoIterator<Item = Generator<E>>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (min, max) = DEMO_RANGE;
    for mut generator in generators {
        let value = generator.generate(min, max)?;
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// Prints `count` integers from `[min, max]`, one per line.
///
/// # Errors
///
/// Returns `CliError` on the first failed draw or write.
pub fn draw<E: EntropySource>(
    generator: &mut Generator<E>,
    min: i64,
    max: i64,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    info!(mode = %generator.mode(), min, max, count, "drawing");
    for _ in 0..count {
        writeln!(out, "{}", generator.generate(min, max)?)?;
    }
    Ok(())
}

/// Result of a pixel walk for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    /// Mode walked.
    pub mode: Mode,
    /// Steps taken.
    pub iterations: usize,
    /// Number of distinct positions visited.
    pub distinct: usize,
    /// Smallest position visited, if any step was taken.
    pub min: Option<i64>,
    /// Largest position visited, if any step was taken.
    pub max: Option<i64>,
    /// Steps that landed on the position they started from.
    pub repeats: usize,
}

/// Walks `iterations` steps in `[0, width]`: each generated value is the next
/// position.
///
/// # Errors
///
/// Returns `CliError` on the first failed draw.
pub fn walk<E: EntropySource>(
    generator: &mut Generator<E>,
    iterations: usize,
    width: i64,
) -> Result<WalkSummary, CliError> {
    let mut position = 0;
    let mut visited = BTreeSet::new();
    let mut repeats = 0;
    for _ in 0..iterations {
        let next = generator.generate(0, width)?;
        if next == position {
            repeats += 1;
        }
        visited.insert(next);
        position = next;
    }
    info!(mode = %generator.mode(), iterations, distinct = visited.len(), "walk finished");
    Ok(WalkSummary {
        mode: generator.mode(),
        iterations,
        distinct: visited.len(),
        min: visited.first().copied(),
        max: visited.last().copied(),
        repeats,
    })
}
