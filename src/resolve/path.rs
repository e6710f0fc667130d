//! Key paths.
//!
//! A key path addresses a value inside a table: `brand.primary`,
//! `palette[2]`, `fonts[0].family`. Keys are separated by `.`, sequence
//! indices are written in brackets.

use std::fmt;

use super::error::ResolveError;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A mapping key.
    Key(String),
    /// A sequence index.
    Index(usize),
}

impl Segment {
    /// Returns the segment as a sequence index, if it is one or looks like one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Key(key) if is_digits(key) => key.parse().ok(),
            Segment::Key(_) => None,
        }
    }

    /// Returns the segment as a mapping key.
    pub fn key_text(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// An ordered sequence of [`Segment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Creates a key path from segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parses dotted/bracketed key path text.
    ///
    /// Empty text yields an empty path; the resolver rejects it later with
    /// [`ResolveError::EmptyKeyPath`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidKeyPath`] for empty segments (`a..b`,
    /// `a.`), unclosed brackets and non-numeric indices.
    ///
    /// ```rust
    /// use stylemap::resolve::{KeyPath, Segment};
    ///
    /// let path = KeyPath::parse("fonts[0].family").unwrap();
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         Segment::Key("fonts".into()),
    ///         Segment::Index(0),
    ///         Segment::Key("family".into()),
    ///     ]
    /// );
    /// ```
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        let text = text.trim();
        let invalid = |reason: &str| ResolveError::InvalidKeyPath {
            path: text.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        if text.is_empty() {
            return Ok(Self { segments });
        }

        let mut rest = text;
        loop {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let digits = after[..close].trim();
                if !is_digits(digits) {
                    return Err(invalid(&format!("'[{}]' is not a numeric index", digits)));
                }
                let index = digits
                    .parse()
                    .map_err(|_| invalid(&format!("index '{}' is out of range", digits)))?;
                segments.push(Segment::Index(index));
                rest = &after[close + 1..];
            } else {
                let end = rest.find(&['.', '['][..]).unwrap_or(rest.len());
                let key = rest[..end].trim();
                if key.is_empty() {
                    return Err(invalid("empty segment"));
                }
                segments.push(Segment::Key(key.to_string()));
                rest = &rest[end..];
            }

            if rest.is_empty() {
                break;
            }
            if let Some(after) = rest.strip_prefix('.') {
                if after.trim().is_empty() || after.starts_with('[') {
                    return Err(invalid("empty segment"));
                }
                rest = after;
            } else if !rest.starts_with('[') {
                return Err(invalid("expected '.' or '[' after index"));
            }
        }

        Ok(Self { segments })
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders a run of segments the way they would be written in a reference.
    pub fn render(segments: &[Segment]) -> String {
        let mut out = String::new();
        for segment in segments {
            if matches!(segment, Segment::Key(_)) && !out.is_empty() {
                out.push('.');
            }
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::render(&self.segments))
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
