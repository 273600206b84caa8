//! cefbridge binary entry point
//!
//! Parses arguments, initialises tracing (to stderr, so stdout stays
//! machine-readable) and dispatches to the command handlers.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.log_level.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }

    // 레코더가 없으면 no-op, 호출자가 설치했다면 HELP 텍스트가 붙는다
    cefbridge_core::metrics::describe_all();

    let writer = OutputWriter::new(cli.output);
    if let Err(err) = run(cli, &writer).await {
        tracing::error!(error = %err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli, writer: &OutputWriter) -> Result<(), CliError> {
    match cli.command {
        Commands::Decode(args) => commands::decode::execute(args, &cli.config, writer).await,
        Commands::Encode(args) => commands::encode::execute(args, &cli.config, writer).await,
        Commands::Fields(args) => commands::fields::execute(args, &cli.config, writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, writer).await,
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the `--log-level` flag (default
/// `info`) is used. Logs are written to stderr.
fn init_tracing(level: Option<&str>) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| CliError::Command(format!("failed to initialize tracing subscriber: {e}")))
}
