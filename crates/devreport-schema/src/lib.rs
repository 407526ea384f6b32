//! # devreport-schema — Device Report Schema & Validation Engine
//!
//! This crate holds the fixed schema describing a device status report
//! (temperature sensor, relay/regulation state, network info, GPS location,
//! report-destination configuration) and the engine that validates a parsed
//! JSON document against it.
//!
//! ## Responsibilities
//!
//! - **Schema definition:** the hardcoded report shape as a tagged tree
//!   ([`SchemaNode`]), built once and immutable thereafter.
//! - **Self-check:** a duplicate-key detector that rejects a malformed
//!   schema before any document is examined.
//! - **Validation:** a recursive structural matcher plus regulation domain
//!   rules, producing an ordered list of [`Diagnostic`]s.
//!
//! ## Design
//!
//! The engine is a pure function over immutable inputs: it never mutates
//! the document or the schema, and it performs no I/O. Presentation of the
//! diagnostics is the caller's concern.

pub mod diagnostic;
pub mod domain;
pub mod schema;
pub mod validate;

// Re-export primary types.
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use schema::{detect_duplicate_keys, device_report_schema, PrimitiveKind, SchemaNode};
pub use validate::{ReportValidator, SchemaError, ValidationReport};
