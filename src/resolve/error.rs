//! Resolution errors.

use thiserror::Error;

/// Error returned when a reference cannot be resolved to a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The reference names a table that is not registered.
    #[error("unknown table '{table}'")]
    UnknownTable { table: String },

    /// The reference has no key path, e.g. `map()`.
    #[error("empty key path in reference to table '{table}'")]
    EmptyKeyPath { table: String },

    /// The key path text is malformed.
    #[error("invalid key path '{path}': {reason}")]
    InvalidKeyPath { path: String, reason: String },

    /// A path segment does not exist, or indexes into a scalar.
    ///
    /// `consumed` is the part of the path that did resolve.
    #[error(
        "key '{segment}' not found in table '{table}'{}",
        consumed_suffix(.consumed)
    )]
    KeyPathNotFound {
        table: String,
        consumed: String,
        segment: String,
    },

    /// The value at the end of the path has no textual form.
    #[error("'{path}' in table '{table}' is a {found}, not a scalar")]
    NotScalar {
        table: String,
        path: String,
        found: &'static str,
    },
}

fn consumed_suffix(consumed: &str) -> String {
    if consumed.is_empty() {
        String::new()
    } else {
        format!(" (after '{}')", consumed)
    }
}
