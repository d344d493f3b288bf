//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Narrate picture-book stories with synchronized highlighting.
#[derive(Parser)]
#[command(name = "taleplay")]
#[command(about = "Narrate stories with synchronized text highlighting")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
