//! # mandos CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mandos_cli::check::{run_check, CheckArgs};
use mandos_cli::compare::{run_compare, CompareArgs};
use mandos_cli::decode::{run_decode, DecodeArgs};
use mandos_cli::roundtrip::{run_roundtrip, RoundTripArgs};

/// Mandos fixture value tool.
///
/// Decodes value expressions, evaluates expected-value checks, and verifies
/// that fixture files survive a parse-then-write cycle unchanged.
#[derive(Parser, Debug)]
#[command(name = "mandos", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a value expression.
    Decode(DecodeArgs),

    /// Check an actual value against an expected one (`*` accepts anything).
    Check(CheckArgs),

    /// Compare two results as unsigned numbers.
    Compare(CompareArgs),

    /// Verify a fixture file round-trips without changes.
    Roundtrip(RoundTripArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Decode(args) => run_decode(&args),
        Commands::Check(args) => run_check(&args),
        Commands::Compare(args) => run_compare(&args),
        Commands::Roundtrip(args) => run_roundtrip(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
