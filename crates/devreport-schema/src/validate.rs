//! # Recursive Report Matcher
//!
//! Validates a parsed JSON document against the fixed report schema. Each
//! recursion level runs four fail-fast gates in order (shape, missing
//! field in schema declaration order, unexpected field in document key
//! order, domain rules) and then a per-field pass that evaluates every
//! declared sibling before combining the results: the gates stop at the
//! first offender, while the per-field pass surfaces one diagnostic per
//! broken sibling.
//!
//! Diagnostics are appended to a single ordered side channel as the walk
//! proceeds; everything collected up to a fail-fast stop stays in the
//! report.
//!
//! ## Null typing
//!
//! `null` has its own runtime kind, `"null"`, distinct from every declared
//! primitive kind. A `null` at a declared leaf therefore produces a fatal
//! type mismatch plus a non-fatal null-value warning; the warning never
//! fails a field by itself.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::diagnostic::{Diagnostic, Severity};
use crate::domain::validate_domain_values;
use crate::schema::{
    detect_duplicate_keys, device_report_schema, join_path, PrimitiveKind, SchemaNode,
};

/// Errors raised before any document is examined.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema self-check found sibling fields sharing a name. This is
    /// a programming error in the schema table, not a property of any
    /// input document.
    #[error("schema self-check failed: {} duplicate key(s)", diagnostics.len())]
    DuplicateKeys {
        /// One `DuplicateKey` diagnostic per repeated sibling name.
        diagnostics: Vec<Diagnostic>,
    },
}

/// Outcome of validating one document: a validity verdict plus the ordered
/// diagnostics collected along the way.
///
/// A report can be valid and still carry warnings; only error-severity
/// diagnostics flip the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether the document conforms to the schema.
    pub valid: bool,
    /// Diagnostics in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
            .count()
    }
}

/// A self-checked validator for device status reports.
#[derive(Debug, Clone)]
pub struct ReportValidator {
    schema: SchemaNode,
}

impl ReportValidator {
    /// Build a validator for the fixed report schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateKeys`] if the schema table fails its
    /// duplicate-key self-check; that is a defect in this crate, not a
    /// property of any input.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_schema(device_report_schema())
    }

    /// Build a validator for an arbitrary schema tree, running the same
    /// self-check gate. Exists so the gate is testable independently of
    /// the fixed table.
    pub fn with_schema(schema: SchemaNode) -> Result<Self, SchemaError> {
        let diagnostics = detect_duplicate_keys(&schema);
        if diagnostics.is_empty() {
            Ok(Self { schema })
        } else {
            Err(SchemaError::DuplicateKeys { diagnostics })
        }
    }

    /// The schema this validator checks against.
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Parse input text as JSON, then validate it.
    ///
    /// A parse failure yields an invalid report carrying a single `Parse`
    /// diagnostic, distinct in kind from a structural failure of a
    /// well-formed document.
    pub fn validate_str(&self, text: &str) -> ValidationReport {
        match serde_json::from_str::<Value>(text) {
            Ok(document) => self.validate_value(&document),
            Err(e) => ValidationReport {
                valid: false,
                diagnostics: vec![Diagnostic::parse(e.to_string())],
            },
        }
    }

    /// Validate an already-parsed document.
    pub fn validate_value(&self, document: &Value) -> ValidationReport {
        let mut diagnostics = Vec::new();
        let valid = validate_node(Some(document), &self.schema, "", &mut diagnostics);
        ValidationReport { valid, diagnostics }
    }
}

/// Runtime kind name of a JSON value.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_node(
    value: Option<&Value>,
    schema: &SchemaNode,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    match schema {
        SchemaNode::Leaf(kind) => check_leaf(value, *kind, path, diagnostics),
        SchemaNode::Group(fields) => check_group(value, fields, path, diagnostics),
    }
}

fn check_group(
    value: Option<&Value>,
    fields: &[(String, SchemaNode)],
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    // Gate 1: the subtree must be an object. Absent, null, arrays, and
    // scalars all stop here.
    let Some(obj) = value.and_then(Value::as_object) else {
        diagnostics.push(Diagnostic::structural(path));
        return false;
    };

    // Gate 2: every declared field must be present, checked in schema
    // declaration order; the first absentee aborts the level.
    for (name, _) in fields {
        if !obj.contains_key(name) {
            diagnostics.push(Diagnostic::missing_field(&join_path(path, name)));
            return false;
        }
    }

    // Gate 3: no undeclared fields, checked in document key order; the
    // first intruder aborts the level.
    for key in obj.keys() {
        if !fields.iter().any(|(name, _)| name == key) {
            diagnostics.push(Diagnostic::unexpected_field(&join_path(path, key)));
            return false;
        }
    }

    // Gate 4: regulation domain rules on this level.
    let domain = validate_domain_values(obj);
    if !domain.is_empty() {
        diagnostics.extend(domain);
        return false;
    }

    // Per-field pass: every declared sibling is evaluated; failures are
    // combined after the loop rather than aborting it.
    let mut all_ok = true;
    for (name, child) in fields {
        let ok = validate_node(obj.get(name), child, &join_path(path, name), diagnostics);
        all_ok &= ok;
    }
    all_ok
}

fn check_leaf(
    value: Option<&Value>,
    kind: PrimitiveKind,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let Some(value) = value else {
        // Unreachable behind the missing-field gate; kept so no failure
        // path is ever silent.
        diagnostics.push(Diagnostic::missing_field(path));
        return false;
    };

    let received = json_kind(value);
    let matches = received == kind.name();
    if !matches {
        diagnostics.push(Diagnostic::type_mismatch(path, kind.name(), received));
    }
    if value.is_null() {
        diagnostics.push(Diagnostic::null_value(path));
    }
    matches
}
