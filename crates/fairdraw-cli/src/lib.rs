//! Fairdraw command line front end.
//!
//! The binary in `main.rs` only wires up tracing and the environment; the
//! subcommands live here so they can be driven from tests.

pub mod cli;
pub mod commands;
pub mod error;
