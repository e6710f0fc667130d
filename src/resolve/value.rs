//! Resolved values and their textual form.

use serde_yaml::{Number, Value};

/// The value a reference resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// A string or number, already in textual form.
    Text(String),
    /// A boolean.
    Bool(bool),
    /// An explicit YAML null (`~` or an empty value).
    Null,
    /// A mapping or sequence.
    Structured(Value),
}

impl ResolvedValue {
    /// Converts a table value. Tags are stripped.
    pub fn from_value(value: &Value) -> Self {
        match untag(value) {
            Value::String(s) => ResolvedValue::Text(s.clone()),
            Value::Number(n) => ResolvedValue::Text(number_text(n)),
            Value::Bool(b) => ResolvedValue::Bool(*b),
            Value::Null => ResolvedValue::Null,
            other => ResolvedValue::Structured(other.clone()),
        }
    }

    /// Returns the textual form of a scalar, or `None` for null and
    /// structured values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ResolvedValue::Text(s) => Some(s.clone()),
            ResolvedValue::Bool(b) => Some(b.to_string()),
            ResolvedValue::Null | ResolvedValue::Structured(_) => None,
        }
    }

    /// Returns true for null, `false`, the empty string and empty collections.
    ///
    /// A rule header whose only reference resolves to an empty value is
    /// removed.
    pub fn is_empty(&self) -> bool {
        match self {
            ResolvedValue::Text(s) => s.is_empty(),
            ResolvedValue::Bool(b) => !b,
            ResolvedValue::Null => true,
            ResolvedValue::Structured(Value::Mapping(m)) => m.is_empty(),
            ResolvedValue::Structured(Value::Sequence(s)) => s.is_empty(),
            ResolvedValue::Structured(_) => false,
        }
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedValue::Text(_) => "string",
            ResolvedValue::Bool(_) => "boolean",
            ResolvedValue::Null => "null",
            ResolvedValue::Structured(Value::Sequence(_)) => "sequence",
            ResolvedValue::Structured(_) => "mapping",
        }
    }
}

/// Strips any number of YAML tags.
pub(crate) fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Formats a number without trailing zeros: `2.0` is `2`, `1.50` is `1.5`.
pub(crate) fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        float_text(f)
    } else {
        n.to_string()
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        // Display for f64 is the shortest round-trip form and omits `.0`.
        f.to_string()
    }
}
