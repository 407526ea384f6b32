//! # Check Pipeline
//!
//! Orchestrates one validation run: schema self-check, fetch, parse,
//! validate, report. Validation outcomes map to the exit code (0 valid,
//! 1 invalid); operational failures such as an unreadable source
//! propagate as errors for the entry point to log.

use anyhow::{Context, Result};
use clap::Args;

use devreport_schema::{ReportValidator, SchemaError, ValidationReport};

use crate::fetch::fetch_source;

/// Arguments for one validation run.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Local path or http(s) URL of the status report to validate.
    #[arg(value_name = "SOURCE", default_value = "test.json")]
    pub source: String,

    /// Emit the validation report as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Execute one validation run.
///
/// Returns the process exit code: 0 when the report conforms, 1 when it
/// does not (including parse failures and a failed schema self-check).
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let validator = match ReportValidator::new() {
        Ok(v) => v,
        Err(SchemaError::DuplicateKeys { diagnostics }) => {
            // A malformed schema table is a defect in this tool; surface
            // every duplicate and refuse to look at the document.
            for diagnostic in &diagnostics {
                println!("{diagnostic}");
            }
            println!("FAIL: report schema failed its self-check");
            return Ok(1);
        }
    };

    let text = fetch_source(&args.source)
        .with_context(|| format!("failed to load report from '{}'", args.source))?;
    tracing::debug!(source = %args.source, bytes = text.len(), "loaded report text");

    let report = validator.validate_str(&text);

    if args.json {
        let encoded = serde_json::to_string_pretty(&report)
            .context("failed to encode the validation report as JSON")?;
        println!("{encoded}");
    } else {
        print_report(&args.source, &report);
    }

    Ok(if report.valid { 0 } else { 1 })
}

fn print_report(source: &str, report: &ValidationReport) {
    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }

    if report.valid {
        println!("OK: {source}");
    } else {
        println!("FAIL: {source} — {} error(s)", report.error_count());
    }
}
