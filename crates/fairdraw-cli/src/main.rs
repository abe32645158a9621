//! Fairdraw command line entry point.

use std::error::Error;
use std::io;

use clap::Parser;
use fairdraw_cli::cli::Cli;
use fairdraw_cli::commands;
use fairdraw_core::GeneratorConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Read configuration from environment.
    let config = GeneratorConfig::from_env()?;
    tracing::debug!(mode = %config.mode, seed = ?config.seed, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, config, &mut out)?;

    Ok(())
}
