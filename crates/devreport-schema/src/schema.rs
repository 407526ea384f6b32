//! # Report Schema Definition
//!
//! The fixed, hardcoded shape of a device status report, expressed as a
//! tagged tree ([`SchemaNode`]) rather than runtime type inspection. A
//! group is a vector of `(name, node)` pairs: declaration order is
//! preserved, and duplicate names are physically representable, which is
//! what [`detect_duplicate_keys`] exists to catch before any document is
//! validated.

use std::collections::HashSet;

use crate::diagnostic::Diagnostic;

/// The primitive kinds a leaf field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
}

impl PrimitiveKind {
    /// Wire-level kind name, as reported in type-mismatch diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
        }
    }
}

/// A node in the report schema: a primitive expectation or a named group.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Expect a primitive value of the given kind.
    Leaf(PrimitiveKind),
    /// Expect an object with exactly these fields, in declaration order.
    Group(Vec<(String, SchemaNode)>),
}

impl SchemaNode {
    /// A `string` leaf.
    pub fn string() -> Self {
        SchemaNode::Leaf(PrimitiveKind::String)
    }

    /// A `number` leaf.
    pub fn number() -> Self {
        SchemaNode::Leaf(PrimitiveKind::Number)
    }

    /// A `boolean` leaf.
    pub fn boolean() -> Self {
        SchemaNode::Leaf(PrimitiveKind::Boolean)
    }

    /// A group with the given fields, in declaration order.
    pub fn group<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, SchemaNode)>,
    {
        SchemaNode::Group(
            fields
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        )
    }
}

/// The fixed device status report shape.
///
/// Three levels of nesting: `status`, `location` (with nested `gps`),
/// `regul`, `info`, `net`, and `reporthost`. The field list is bit-exact;
/// report producers and this table must agree.
pub fn device_report_schema() -> SchemaNode {
    SchemaNode::group([
        (
            "status",
            SchemaNode::group([
                ("temperature", SchemaNode::number()),
                ("light", SchemaNode::number()),
                ("regul", SchemaNode::string()),
                ("fire", SchemaNode::boolean()),
                ("heat", SchemaNode::string()),
                ("cold", SchemaNode::string()),
                ("fanspeed", SchemaNode::number()),
            ]),
        ),
        (
            "location",
            SchemaNode::group([
                ("room", SchemaNode::string()),
                (
                    "gps",
                    SchemaNode::group([
                        ("lat", SchemaNode::number()),
                        ("lon", SchemaNode::number()),
                    ]),
                ),
                ("address", SchemaNode::string()),
            ]),
        ),
        (
            "regul",
            SchemaNode::group([
                ("lt", SchemaNode::number()),
                ("ht", SchemaNode::number()),
            ]),
        ),
        (
            "info",
            SchemaNode::group([
                ("ident", SchemaNode::string()),
                ("user", SchemaNode::string()),
                ("loc", SchemaNode::string()),
            ]),
        ),
        (
            "net",
            SchemaNode::group([
                ("uptime", SchemaNode::string()),
                ("ssid", SchemaNode::string()),
                ("mac", SchemaNode::string()),
                ("ip", SchemaNode::string()),
            ]),
        ),
        (
            "reporthost",
            SchemaNode::group([
                ("target_ip", SchemaNode::string()),
                ("target_port", SchemaNode::number()),
                ("sp", SchemaNode::number()),
            ]),
        ),
    ])
}

/// Walk the schema tree and report every field name that repeats among its
/// siblings, as a dotted path.
///
/// Uniqueness is per level: `lat` under `gps` does not conflict with a
/// `lat` anywhere else. The walk accumulates everything (it never
/// short-circuits), so a single pass reports all duplicates. Any non-empty
/// result means the schema itself is malformed and document validation
/// must not proceed.
pub fn detect_duplicate_keys(schema: &SchemaNode) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    walk_duplicates(schema, "", &mut diagnostics);
    diagnostics
}

fn walk_duplicates(node: &SchemaNode, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    let SchemaNode::Group(fields) = node else {
        return;
    };
    let mut seen: HashSet<&str> = HashSet::new();
    for (name, child) in fields {
        let full = join_path(path, name);
        if !seen.insert(name.as_str()) {
            diagnostics.push(Diagnostic::duplicate_key(&full));
        }
        walk_duplicates(child, &full, diagnostics);
    }
}

/// Append a field name to a dotted path; the empty path is the root.
pub(crate) fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn fixed_schema_declares_the_six_top_level_groups_in_order() {
        let SchemaNode::Group(fields) = device_report_schema() else {
            panic!("report schema root must be a group");
        };
        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["status", "location", "regul", "info", "net", "reporthost"]
        );
    }

    #[test]
    fn gps_is_nested_under_location() {
        let SchemaNode::Group(fields) = device_report_schema() else {
            panic!("report schema root must be a group");
        };
        let (_, location) = &fields[1];
        let SchemaNode::Group(location_fields) = location else {
            panic!("'location' must be a group");
        };
        let (name, gps) = &location_fields[1];
        assert_eq!(name, "gps");
        assert_eq!(
            *gps,
            SchemaNode::group([
                ("lat", SchemaNode::number()),
                ("lon", SchemaNode::number()),
            ])
        );
    }

    #[test]
    fn fixed_schema_passes_the_self_check() {
        assert!(detect_duplicate_keys(&device_report_schema()).is_empty());
    }

    #[test]
    fn sibling_duplicate_is_reported_with_its_dotted_path() {
        let schema = SchemaNode::group([
            (
                "status",
                SchemaNode::group([
                    ("heat", SchemaNode::string()),
                    ("heat", SchemaNode::string()),
                ]),
            ),
        ]);
        let diags = detect_duplicate_keys(&schema);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::DuplicateKey);
        assert_eq!(diags[0].path, "status.heat");
    }

    #[test]
    fn same_name_at_different_levels_is_not_a_duplicate() {
        let schema = SchemaNode::group([
            ("lat", SchemaNode::number()),
            (
                "gps",
                SchemaNode::group([
                    ("lat", SchemaNode::number()),
                    ("lon", SchemaNode::number()),
                ]),
            ),
        ]);
        assert!(detect_duplicate_keys(&schema).is_empty());
    }

    #[test]
    fn all_duplicates_are_accumulated_in_one_pass() {
        let schema = SchemaNode::group([
            ("a", SchemaNode::string()),
            ("a", SchemaNode::string()),
            (
                "nested",
                SchemaNode::group([
                    ("b", SchemaNode::number()),
                    ("b", SchemaNode::number()),
                ]),
            ),
        ]);
        let diags = detect_duplicate_keys(&schema);
        let paths: Vec<&str> = diags.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["a", "nested.b"]);
    }

    #[test]
    fn triple_occurrence_reports_each_repeat() {
        let schema = SchemaNode::group([
            ("x", SchemaNode::string()),
            ("x", SchemaNode::string()),
            ("x", SchemaNode::string()),
        ]);
        assert_eq!(detect_duplicate_keys(&schema).len(), 2);
    }

    #[test]
    fn leaves_are_not_recursed_into() {
        // A bare leaf has no siblings to conflict with.
        assert!(detect_duplicate_keys(&SchemaNode::string()).is_empty());
    }

    #[test]
    fn join_path_handles_the_root() {
        assert_eq!(join_path("", "status"), "status");
        assert_eq!(join_path("location.gps", "lat"), "location.gps.lat");
    }
}
