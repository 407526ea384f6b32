//! # Regulation Domain Rules
//!
//! Value constraints that go beyond type checking: the relay fields
//! `status.cold` and `status.heat` must read `ON`/`OFF`, `status.regul`
//! must name a regulation mode, and the `regul` thresholds must satisfy
//! `lt <= ht`.
//!
//! Every rule is truthy-guarded: a field that is absent, `null`, `""`,
//! `0`, or `false` is skipped, not rejected. Devices mid-boot send empty
//! relay fields; the permissiveness is part of the contract.

use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;

/// Admissible relay states for `status.cold` and `status.heat`.
const RELAY_STATES: [&str; 2] = ["ON", "OFF"];

/// Admissible regulation modes for `status.regul`.
const REGULATION_MODES: [&str; 3] = ["COOL", "HALT", "HEAT"];

/// Check the regulation domain rules against one object level.
///
/// Pure function: reads `status` and `regul` out of the given object (both
/// may be absent; the rules only activate on the level that carries them),
/// never mutates anything, and never short-circuits between the four
/// checks. Returns the violations in rule order.
pub fn validate_domain_values(obj: &Map<String, Value>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if let Some(status) = obj.get("status").filter(|v| is_truthy(v)) {
        check_enum(status, "cold", &RELAY_STATES, "status.cold", &mut diagnostics);
        check_enum(status, "heat", &RELAY_STATES, "status.heat", &mut diagnostics);
        check_enum(
            status,
            "regul",
            &REGULATION_MODES,
            "status.regul",
            &mut diagnostics,
        );
    }

    if let Some(regul) = obj.get("regul").filter(|v| is_truthy(v)) {
        let lt = regul.get("lt").and_then(Value::as_f64);
        let ht = regul.get("ht").and_then(Value::as_f64);
        if let (Some(lt), Some(ht)) = (lt, ht) {
            if lt > ht {
                diagnostics.push(Diagnostic::domain_rule(
                    "regul",
                    format!("invalid thresholds: 'lt' ({lt}) exceeds 'ht' ({ht})"),
                ));
            }
        }
    }

    diagnostics
}

/// Check a truthy-guarded enum field against its admissible values.
///
/// A truthy value of any non-string kind is a violation too.
fn check_enum(
    parent: &Value,
    field: &str,
    allowed: &[&str],
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(value) = parent.get(field) else {
        return;
    };
    if !is_truthy(value) {
        return;
    }
    let admissible = value.as_str().is_some_and(|s| allowed.contains(&s));
    if !admissible {
        diagnostics.push(Diagnostic::domain_rule(
            path,
            format!("invalid value for '{field}': {value}"),
        ));
    }
}

/// Truthiness as the report producers understand it: `null`, `false`, `0`,
/// and `""` are falsy; everything else (including any array or object) is
/// truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
