//! Error types for the command line front end.

use fairdraw_core::RngError;
use thiserror::Error;

/// Errors surfaced by a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// A generator, configuration or argument error.
    #[error(transparent)]
    Rng(#[from] RngError),

    /// Writing results failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a summary failed.
    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
