//! Traversal helpers for loaded JSON document trees
//!
//! Compliance documents are nested key/value records in which every boolean
//! leaf represents one pass/fail assertion ("engagement letter signed",
//! "reviewer independent", ...). The walk here turns a whole document tree
//! into an assertion tally for the base readiness ratio.

use serde_json::Value;

/// Keys that hold narrative metadata rather than compliance checks.
const EXCLUDED_KEYS: [&str; 5] = ["status", "issue", "issues", "notes", "document_type"];

/// Maximum traversal depth, root mapping inclusive.
const MAX_DEPTH: usize = 5;

/// Tally of boolean assertions found in a document tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssertionCounts {
    pub total: usize,
    pub passed: usize,
}

impl AssertionCounts {
    /// Fold another tally into this one.
    pub fn merge(&mut self, other: AssertionCounts) {
        self.total += other.total;
        self.passed += other.passed;
    }

    /// Completion ratio in [0, 1]. Zero assertions is defined as 0, not NaN.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// Count every boolean leaf under `doc` as one pass/fail assertion.
///
/// Excluded metadata keys are skipped at every level (their whole subtree,
/// whatever its shape). Sequences contribute only their mapping-shaped
/// elements; booleans are counted only as mapping values. The walk stops at
/// [`MAX_DEPTH`] so malformed or adversarial input cannot recurse unbounded.
pub fn count_assertions(doc: &Value) -> AssertionCounts {
    let mut counts = AssertionCounts::default();
    walk(doc, 0, &mut counts);
    counts
}

fn walk(value: &Value, depth: usize, counts: &mut AssertionCounts) {
    if depth >= MAX_DEPTH {
        return;
    }
    let Value::Object(map) = value else {
        // Non-mapping roots carry no keyed assertions.
        return;
    };
    for (key, child) in map {
        if EXCLUDED_KEYS.contains(&key.as_str()) {
            continue;
        }
        match child {
            Value::Bool(b) => {
                counts.total += 1;
                if *b {
                    counts.passed += 1;
                }
            }
            Value::Object(_) => walk(child, depth + 1, counts),
            Value::Array(items) => {
                for item in items {
                    if item.is_object() {
                        walk(item, depth + 1, counts);
                    }
                }
            }
            Value::Null | Value::Number(_) | Value::String(_) => {}
        }
    }
}
