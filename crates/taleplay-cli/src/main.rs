//! CLI entry point.
//!
//! Installs logging, loads `.env`, parses arguments and dispatches to the
//! command handlers. Handler errors are reported on stderr and mapped to
//! process exit codes.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use taleplay_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads TALEPLAY_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let result = match command {
        Commands::Segment { text, json } => handlers::segment::execute(&text, json),
        Commands::Hints { story, json } => handlers::hints::execute(&story, json),
        Commands::Play(args) => handlers::play::execute(&args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}

/// Log to stderr so stdout stays free for narration output.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
