//! # devreport CLI entry point
//!
//! Parses command-line arguments, initializes tracing from the verbosity
//! count, and dispatches to the check pipeline.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use devreport_cli::check::{run_check, CheckArgs};

/// Device status report validator.
///
/// Loads a JSON status report from a local file or an HTTP(S) URL and
/// checks it against the fixed device-report schema: required fields,
/// forbidden extras, value types, and the regulation domain rules.
#[derive(Parser, Debug)]
#[command(name = "devreport", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run_check(&cli.check) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
