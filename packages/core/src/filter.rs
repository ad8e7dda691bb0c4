//! Filter expression builder for the remote search index.
//!
//! Turns a sparse set of optional equality constraints into a single boolean
//! filter expression string, escaping values so that any input string is safe
//! to embed. Building is pure and total: no value can make it fail.

use serde::{Deserialize, Serialize};

/// Optional equality constraints over the searchable record fields.
///
/// Each field is either absent or a non-empty constraint value. An empty
/// `FilterSpec` builds to `None`, which callers must treat as "do not filter"
/// rather than as an empty filter expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Constrain the record identifier field.
    pub identifier: Option<String>,
    /// Constrain the record username field.
    pub username: Option<String>,
}

impl FilterSpec {
    /// Builds the filter expression, or `None` when no constraint is set.
    ///
    /// Present fields are emitted in a fixed order (identifier, then
    /// username) so the output is deterministic, and joined with `" AND "`.
    /// Values are embedded as `field:"value"` with backslash and double-quote
    /// characters escaped.
    #[must_use]
    pub fn build(&self) -> Option<String> {
        let mut clauses = Vec::with_capacity(2);

        if let Some(identifier) = &self.identifier {
            clauses.push(format!("identifier:\"{}\"", escape_value(identifier)));
        }
        if let Some(username) = &self.username {
            clauses.push(format!("username:\"{}\"", escape_value(username)));
        }

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" AND "))
        }
    }

    /// Returns true when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none() && self.username.is_none()
    }
}

/// Escapes a constraint value for embedding inside a quoted filter clause.
///
/// Backslash and double-quote are each preceded by a backslash. No other
/// transformation: no trimming, no case folding.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
