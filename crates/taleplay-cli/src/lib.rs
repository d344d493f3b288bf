//! `taleplay` command-line interface.
//!
//! Segments text, lists module hints and narrates story documents in the
//! terminal with a paced simulated narrator.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use commands::{Commands, HighlightArg, PlayArgs};
pub use error::CliError;
pub use parser::Cli;
