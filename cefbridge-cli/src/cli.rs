//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cefbridge -- CEF message decoder and encoder.
///
/// Use `cefbridge <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "cefbridge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the cefbridge.toml configuration file.
    #[arg(short, long, default_value = "cefbridge.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode CEF messages into structured events.
    Decode(DecodeArgs),

    /// Encode structured events (JSON lines) into CEF messages.
    Encode(EncodeArgs),

    /// List the CEF field mapping dictionary.
    Fields(FieldsArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- decode ----

/// Decode CEF messages, one per line.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file with one CEF message per line (default: stdin).
    pub input: Option<PathBuf>,

    /// Print only summary counters, not the decoded events.
    #[arg(long)]
    pub summary_only: bool,
}

// ---- encode ----

/// Encode structured events into CEF messages.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input file with one JSON event per line (default: stdin).
    pub input: Option<PathBuf>,
}

// ---- fields ----

/// List the field mapping dictionary in effect.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Show only entries whose key, name or target contains this text.
    #[arg(long)]
    pub filter: Option<String>,
}

// ---- config ----

/// Manage cefbridge configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, codec).
        #[arg(long)]
        section: Option<String>,
    },
}
