//! Command line arguments.

use clap::{Parser, Subcommand};
use fairdraw_core::Mode;

/// Random integers and bytes from interchangeable backends.
#[derive(Debug, Parser)]
#[command(name = "fairdraw", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one integer in [1, 10] per mode
    Demo,
    /// Print integers from a closed range
    Draw {
        /// Lower bound, inclusive
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        min: i64,
        /// Upper bound, inclusive (defaults to the largest platform word)
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i64>,
        /// Number of integers to print
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Mode name or code, overriding FAIRDRAW_MODE
        #[arg(long)]
        mode: Option<Mode>,
        /// Integer seed, overriding FAIRDRAW_SEED
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<String>,
    },
    /// Print random bytes as hex
    Bytes {
        /// Number of bytes
        len: usize,
        /// Read from the crypto byte source instead of the thread CSPRNG
        #[arg(long)]
        crypto: bool,
    },
    /// Print a seed derived from the system clock
    Seed,
    /// Run the pixel walk for every mode and print a JSON summary per mode
    Walk {
        /// Steps per mode
        #[arg(long, default_value_t = 100_000)]
        iterations: usize,
        /// Largest position, inclusive
        #[arg(long, default_value_t = 800)]
        width: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_draw_parses_mode_and_negative_bounds() {
        let cli = Cli::try_parse_from([
            "fairdraw", "draw", "--min", "-5", "--max", "5", "--mode", "mt", "--seed", "-3",
        ])
        .unwrap();
        match cli.command {
            Command::Draw {
                min,
                max,
                mode,
                seed,
                count,
            } => {
                assert_eq!(min, -5);
                assert_eq!(max, Some(5));
                assert_eq!(mode, Some(Mode::MersenneTwister));
                assert_eq!(seed.as_deref(), Some("-3"));
                assert_eq!(count, 1);
            }
            other => panic!("expected Draw, got {other:?}"),
        }
    }

    #[test]
    fn test_draw_rejects_retired_mode() {
        assert!(Cli::try_parse_from(["fairdraw", "draw", "--mode", "mcrypt"]).is_err());
    }
}
