//! Finding and parsing `map()` references in style text.
//!
//! # Syntax
//!
//! | Form | Table | Path |
//! |------|-------|------|
//! | `map(brand.primary)` | default | `brand.primary` |
//! | `map(colors:brand.primary)` | `colors` | `brand.primary` |
//! | `colors:map(brand.primary)` | `colors` | `brand.primary` |
//! | `map(colors, brand, primary)` | `colors` | `brand`, `primary` |
//!
//! Inside the call a table name is any text without whitespace, or any quoted
//! text, so tables named after files like `2024-colors.yml` or `brand.v2.yml`
//! can be reached. The prefix form takes names made of letters, digits, `_`,
//! `-` and `.`, and is only recognised when the name starts the text or
//! follows whitespace or a comma, so `(min-width:map(bp.md))` is a plain
//! reference. `map(` preceded by an identifier character (`bitmap(`) is not a
//! reference at all.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ResolveError;
use super::path::{KeyPath, Segment};

/// The function token that introduces a reference.
pub const FUNCTION_NAME: &str = "map";

static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{}\(([^()]*)\)", regex::escape(FUNCTION_NAME)))
        .expect("reference pattern is valid")
});

/// A parsed reference: an optional table name and a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Explicit table name, if the reference gives one.
    pub table: Option<String>,
    /// Path inside the table.
    pub path: KeyPath,
}

impl Reference {
    /// Creates a reference.
    pub fn new(table: Option<String>, path: KeyPath) -> Self {
        Self { table, path }
    }

    /// Parses the argument text of a `map(...)` call.
    ///
    /// ```rust
    /// use stylemap::resolve::Reference;
    ///
    /// let reference = Reference::parse("theme:brand.primary").unwrap();
    /// assert_eq!(reference.table.as_deref(), Some("theme"));
    /// assert_eq!(reference.path.to_string(), "brand.primary");
    /// ```
    pub fn parse(args: &str) -> Result<Self, ResolveError> {
        let args = args.trim();

        if args.contains(',') {
            return parse_argument_list(args);
        }

        match args.split_once(':') {
            Some((table, path)) => {
                let table = table_name(table).ok_or_else(|| ResolveError::InvalidKeyPath {
                    path: args.to_string(),
                    reason: format!("'{}' is not a table name", table.trim()),
                })?;
                Ok(Self::new(Some(table.to_string()), KeyPath::parse(path)?))
            }
            None => Ok(Self::new(None, KeyPath::parse(args)?)),
        }
    }

    /// Returns the explicit table name, or `default` if there is none.
    pub fn table_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.table.as_deref().unwrap_or(default)
    }
}

/// A `map(...)` occurrence found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte range of the whole reference, including any table prefix.
    pub span: Range<usize>,
    /// The parsed reference, or why it could not be parsed.
    pub reference: Result<Reference, ResolveError>,
}

/// Finds every reference in `text`, in order.
///
/// Spans never overlap. A reference that is found but malformed is still
/// reported, with the parse error in place of the [`Reference`].
pub fn find_references(text: &str) -> Vec<Occurrence> {
    let mut found = Vec::new();

    for caps in CALL.captures_iter(text) {
        let (Some(call), Some(args)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let before = &text[..call.start()];
        if before.chars().next_back().is_some_and(is_identifier_char) {
            continue;
        }

        let (start, prefix) = match table_prefix(before) {
            Some((start, table)) => (start, Some(table)),
            None => (call.start(), None),
        };

        let reference = Reference::parse(args.as_str()).and_then(|reference| match prefix {
            Some(_) if reference.table.is_some() => Err(ResolveError::InvalidKeyPath {
                path: text[start..call.end()].to_string(),
                reason: "table given twice".to_string(),
            }),
            Some(table) => Ok(Reference::new(Some(table.to_string()), reference.path)),
            None => Ok(reference),
        });

        found.push(Occurrence {
            span: start..call.end(),
            reference,
        });
    }

    found
}

/// Parses the older `map(table, key, subkey)` argument list.
fn parse_argument_list(args: &str) -> Result<Reference, ResolveError> {
    let invalid = |reason: String| ResolveError::InvalidKeyPath {
        path: args.to_string(),
        reason,
    };

    let mut parts = args.split(',');
    let first = parts.next().unwrap_or_default();
    let table =
        table_name(first).ok_or_else(|| invalid(format!("'{}' is not a table name", first.trim())))?;

    let segments = parts
        .map(|part| unquote(part.trim()))
        .map(|part| {
            if part.is_empty() {
                Err(invalid("empty argument".to_string()))
            } else if part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse()
                    .map(Segment::Index)
                    .map_err(|_| invalid(format!("index '{}' is out of range", part)))
            } else {
                Ok(Segment::Key(part.to_string()))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reference::new(Some(table.to_string()), KeyPath::new(segments)))
}

/// Finds a `name:` prefix at the end of `before`.
///
/// Returns the byte offset where the name starts, and the name.
fn table_prefix(before: &str) -> Option<(usize, &str)> {
    let head = before.strip_suffix(':')?;
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_identifier_char(c) || c == '.')
        .last()
        .map(|(i, _)| i)?;
    let name = &head[start..];
    match head[..start].chars().next_back() {
        None => Some((start, name)),
        Some(c) if c.is_whitespace() || c == ',' => Some((start, name)),
        Some(_) => None,
    }
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Accepts a quoted name, or an unquoted one without whitespace or quotes.
fn table_name(text: &str) -> Option<&str> {
    let text = text.trim();
    let unquoted = unquote(text);
    let valid = if unquoted.len() < text.len() {
        !unquoted.is_empty()
    } else {
        !text.is_empty() && !text.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'')
    };
    valid.then_some(unquoted)
}
