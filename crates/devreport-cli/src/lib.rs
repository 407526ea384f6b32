//! # devreport-cli — CLI for the Device Report Validator
//!
//! Provides the `devreport` command: resolve a source identifier (local
//! path or `http://`/`https://` URL) to raw text, parse it as JSON, run
//! the validation engine from `devreport-schema`, and report the outcome.
//!
//! ```bash
//! devreport                      # validates ./test.json
//! devreport report.json
//! devreport https://device.local/status.json
//! devreport report.json --json   # machine-readable report
//! ```
//!
//! Exit code 0 means the report conforms; 1 covers validation failures,
//! parse failures, and loader failures.

pub mod check;
pub mod fetch;
