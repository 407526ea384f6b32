//! # Validation Diagnostics
//!
//! Structured messages describing one validation or parse problem each.
//! A [`Diagnostic`] carries its classification ([`DiagnosticKind`]), the
//! dotted path of the field it concerns, and a human-readable message.
//! The `Display` form prefixes a severity marker and a stable kind label
//! so plain-text output stays grep-able.

use serde::Serialize;

/// How serious a diagnostic is. Only warnings leave a report valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; never fails validation by itself.
    Warning,
    /// Fails validation.
    Error,
}

/// Classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The document (or a subtree) is not an object where one is required.
    Structural,
    /// A field declared in the schema is absent from the document.
    MissingField,
    /// The document carries a field the schema does not declare.
    UnexpectedField,
    /// A leaf value's runtime kind differs from the declared kind.
    TypeMismatch,
    /// A leaf value is `null`. Warning only.
    NullValue,
    /// A regulation domain rule was violated.
    DomainRule,
    /// Two sibling fields in the schema share a name (self-check failure).
    DuplicateKey,
    /// The input text is not well-formed JSON.
    Parse,
}

impl DiagnosticKind {
    /// Stable label used in the `Display` form.
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Structural => "structural",
            DiagnosticKind::MissingField => "missing-field",
            DiagnosticKind::UnexpectedField => "unexpected-field",
            DiagnosticKind::TypeMismatch => "type-mismatch",
            DiagnosticKind::NullValue => "null-value",
            DiagnosticKind::DomainRule => "domain-rule",
            DiagnosticKind::DuplicateKey => "duplicate-key",
            DiagnosticKind::Parse => "parse",
        }
    }

    /// Severity of this kind. `NullValue` is the only warning.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::NullValue => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One validation or parse problem.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Classification of the problem.
    pub kind: DiagnosticKind,
    /// Dotted path of the concerned field; empty for the document root.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// The subtree at `path` is absent, `null`, or not an object.
    pub fn structural(path: &str) -> Self {
        let message = if path.is_empty() {
            "report root must be an object".to_string()
        } else {
            format!("'{path}' must be an object")
        };
        Self::new(DiagnosticKind::Structural, path, message)
    }

    /// A required field is absent from its level.
    pub fn missing_field(path: &str) -> Self {
        Self::new(
            DiagnosticKind::MissingField,
            path,
            format!("required field '{path}' is absent"),
        )
    }

    /// A document field is not declared in the schema at its level.
    pub fn unexpected_field(path: &str) -> Self {
        Self::new(
            DiagnosticKind::UnexpectedField,
            path,
            format!("field '{path}' is not declared in the schema"),
        )
    }

    /// A leaf value's runtime kind disagrees with the declared kind.
    pub fn type_mismatch(path: &str, expected: &str, received: &str) -> Self {
        Self::new(
            DiagnosticKind::TypeMismatch,
            path,
            format!("expected '{expected}' at '{path}', received '{received}'"),
        )
    }

    /// A leaf value is exactly `null`.
    pub fn null_value(path: &str) -> Self {
        Self::new(
            DiagnosticKind::NullValue,
            path,
            format!("null value at '{path}'"),
        )
    }

    /// A regulation domain rule was violated. The message is rule-specific.
    pub fn domain_rule(path: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::DomainRule, path, message)
    }

    /// Two sibling schema fields share a name.
    pub fn duplicate_key(path: &str) -> Self {
        Self::new(
            DiagnosticKind::DuplicateKey,
            path,
            format!("duplicate key '{path}' in the schema"),
        )
    }

    /// The input text failed to parse as JSON.
    pub fn parse(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(
            DiagnosticKind::Parse,
            "",
            format!("input is not well-formed JSON: {reason}"),
        )
    }

    /// Severity of this diagnostic, delegated to its kind.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{marker}[{}]: {}", self.kind.label(), self.message)
    }
}
