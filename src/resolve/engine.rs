//! Resolving references against a [`Registry`].

use std::ops::Range;

use serde_yaml::{Mapping, Value};

use super::error::ResolveError;
use super::path::{KeyPath, Segment};
use super::reference::{find_references, Reference};
use super::value::{number_text, untag, ResolvedValue};
use crate::table::Registry;

/// A successfully resolved reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The table the value came from.
    pub table: String,
    /// The path that was followed.
    pub path: KeyPath,
    /// The value at the end of the path.
    pub value: ResolvedValue,
}

impl Resolved {
    /// Returns the value's textual form.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotScalar`] for null, mappings and sequences.
    pub fn text(&self) -> Result<String, ResolveError> {
        self.value.as_text().ok_or_else(|| ResolveError::NotScalar {
            table: self.table.clone(),
            path: self.path.to_string(),
            found: self.value.kind(),
        })
    }
}

/// One reference found in text, with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Byte range of the reference in the original text.
    pub span: Range<usize>,
    /// What the reference resolved to.
    pub result: Result<Resolved, ResolveError>,
}

/// Finds and resolves every reference in `text`.
///
/// References without an explicit table use `default_table`. The result is
/// in text order; an empty vector means the text has no references.
///
/// ```rust
/// use stylemap::resolve::resolve;
/// use stylemap::table::Registry;
///
/// let mut registry = Registry::new();
/// registry.insert("colors", serde_yaml::from_str("primary: '#fff'").unwrap());
///
/// let resolutions = resolve(&registry, "colors", "1px solid map(primary)");
/// assert_eq!(resolutions.len(), 1);
/// assert_eq!(resolutions[0].span, 10..22);
/// assert_eq!(resolutions[0].result.as_ref().unwrap().text().unwrap(), "#fff");
/// ```
pub fn resolve(registry: &Registry, default_table: &str, text: &str) -> Vec<Resolution> {
    find_references(text)
        .into_iter()
        .map(|occurrence| Resolution {
            span: occurrence.span,
            result: occurrence
                .reference
                .and_then(|reference| resolve_reference(registry, default_table, &reference)),
        })
        .collect()
}

/// Resolves a single parsed reference.
///
/// An empty path is rejected before the table is looked up, so it reports
/// [`ResolveError::EmptyKeyPath`] whatever the registry holds.
pub fn resolve_reference(
    registry: &Registry,
    default_table: &str,
    reference: &Reference,
) -> Result<Resolved, ResolveError> {
    let table = reference.table_or(default_table);

    if reference.path.is_empty() {
        return Err(ResolveError::EmptyKeyPath {
            table: table.to_string(),
        });
    }

    let root = registry
        .get(table)
        .ok_or_else(|| ResolveError::UnknownTable {
            table: table.to_string(),
        })?;

    let value = lookup(table, root, &reference.path)?;

    Ok(Resolved {
        table: table.to_string(),
        path: reference.path.clone(),
        value: ResolvedValue::from_value(value),
    })
}

/// Walks `path` through `root`, one segment at a time.
///
/// Mappings are indexed by key, sequences by index. A missing key, an index
/// out of range, or a step into a scalar fails with
/// [`ResolveError::KeyPathNotFound`] carrying the prefix that did resolve.
pub fn lookup<'a>(table: &str, root: &'a Value, path: &KeyPath) -> Result<&'a Value, ResolveError> {
    let mut current = untag(root);

    for (depth, segment) in path.segments().iter().enumerate() {
        let next = match current {
            Value::Mapping(map) => mapping_get(map, segment),
            Value::Sequence(seq) => segment.as_index().and_then(|i| seq.get(i)),
            _ => None,
        };

        current = match next {
            Some(value) => untag(value),
            None => {
                return Err(ResolveError::KeyPathNotFound {
                    table: table.to_string(),
                    consumed: KeyPath::render(&path.segments()[..depth]),
                    segment: segment.to_string(),
                })
            }
        };
    }

    Ok(current)
}

/// Substitutes every resolution into `text` in one pass.
///
/// Spans refer to the original text, so earlier replacements never shift
/// later ones.
///
/// # Errors
///
/// Returns the first failed resolution, or [`ResolveError::NotScalar`] if a
/// value has no textual form. Nothing is substituted in that case.
pub fn rewrite(text: &str, resolutions: &[Resolution]) -> Result<String, ResolveError> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for resolution in resolutions {
        let replacement = match &resolution.result {
            Ok(resolved) => resolved.text()?,
            Err(err) => return Err(err.clone()),
        };
        out.push_str(&text[cursor..resolution.span.start]);
        out.push_str(&replacement);
        cursor = resolution.span.end;
    }

    out.push_str(&text[cursor..]);
    Ok(out)
}

fn mapping_get<'a>(map: &'a Mapping, segment: &Segment) -> Option<&'a Value> {
    let key = segment.key_text();
    if let Some(value) = map.get(key.as_str()) {
        return Some(value);
    }
    // Keys written as numbers or booleans in YAML.
    map.iter()
        .find(|(k, _)| scalar_key_text(k).as_deref() == Some(key.as_str()))
        .map(|(_, v)| v)
}

fn scalar_key_text(key: &Value) -> Option<String> {
    match untag(key) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.insert(
            "colors",
            serde_yaml::from_str(
                r##"
primary: "#fff"
brand:
  primary: "#000"
  accent: ~
palette: [red, green, blue]
fonts:
  - family: Inter
    weight: 400
line-height: 1.50
enabled: true
200: light
"##,
            )
            .unwrap(),
        );
        registry.insert("spacing", serde_yaml::from_str("base: 8px").unwrap());
        registry
    }

    fn text(source: &str) -> Result<String, ResolveError> {
        let resolutions = resolve(&registry(), "colors", source);
        rewrite(source, &resolutions)
    }

    #[test]
    fn test_resolve_scalar() {
        assert_eq!(text("map(primary)").unwrap(), "#fff");
        assert_eq!(text("map(line-height)").unwrap(), "1.5");
        assert_eq!(text("map(enabled)").unwrap(), "true");
    }

    #[test]
    fn test_resolve_nested() {
        assert_eq!(text("map(brand.primary)").unwrap(), "#000");
        assert_eq!(text("map(palette[1])").unwrap(), "green");
        assert_eq!(text("map(palette.2)").unwrap(), "blue");
        assert_eq!(text("map(fonts[0].family)").unwrap(), "Inter");
        assert_eq!(text("map(fonts[0].weight)").unwrap(), "400");
    }

    #[test]
    fn test_resolve_numeric_key() {
        assert_eq!(text("map(200)").unwrap(), "light");
    }

    #[test]
    fn test_resolve_explicit_table() {
        assert_eq!(text("map(spacing:base)").unwrap(), "8px");
        assert_eq!(text("spacing:map(base)").unwrap(), "8px");
        assert_eq!(text("map(spacing, base)").unwrap(), "8px");
    }

    #[test]
    fn test_rewrite_multiple_at_once() {
        assert_eq!(
            text("map(spacing:base) solid map(brand.primary)").unwrap(),
            "8px solid #000"
        );
        // A replacement longer than its reference does not disturb the next span.
        assert_eq!(text("map(enabled)map(primary)").unwrap(), "true#fff");
    }

    #[test]
    fn test_rewrite_without_references_is_identity() {
        assert_eq!(text("1px solid red").unwrap(), "1px solid red");
    }

    #[test]
    fn test_unknown_table() {
        assert_eq!(
            text("map(theme:primary)"),
            Err(ResolveError::UnknownTable {
                table: "theme".to_string()
            })
        );
    }

    #[test]
    fn test_empty_key_path() {
        assert_eq!(
            text("map()"),
            Err(ResolveError::EmptyKeyPath {
                table: "colors".to_string()
            })
        );
        assert_eq!(
            text("map(missing:)"),
            Err(ResolveError::EmptyKeyPath {
                table: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_key_path_not_found_reports_consumed_prefix() {
        assert_eq!(
            text("map(brand.missing)"),
            Err(ResolveError::KeyPathNotFound {
                table: "colors".to_string(),
                consumed: "brand".to_string(),
                segment: "missing".to_string(),
            })
        );
        assert_eq!(
            text("map(nothing)"),
            Err(ResolveError::KeyPathNotFound {
                table: "colors".to_string(),
                consumed: String::new(),
                segment: "nothing".to_string(),
            })
        );
    }

    #[test]
    fn test_key_path_through_scalar() {
        assert_eq!(
            text("map(primary.shade)"),
            Err(ResolveError::KeyPathNotFound {
                table: "colors".to_string(),
                consumed: "primary".to_string(),
                segment: "shade".to_string(),
            })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            text("map(palette[9])"),
            Err(ResolveError::KeyPathNotFound {
                table: "colors".to_string(),
                consumed: "palette".to_string(),
                segment: "[9]".to_string(),
            })
        );
    }

    #[test]
    fn test_structured_value_is_not_text() {
        assert!(matches!(
            text("map(brand)"),
            Err(ResolveError::NotScalar { found: "mapping", .. })
        ));
        assert!(matches!(
            text("map(brand.accent)"),
            Err(ResolveError::NotScalar { found: "null", .. })
        ));
    }

    #[test]
    fn test_structured_value_resolves() {
        let resolutions = resolve(&registry(), "colors", "map(palette)");
        let resolved = resolutions[0].result.as_ref().unwrap();
        assert_eq!(resolved.value.kind(), "sequence");
        assert_eq!(resolved.table, "colors");
    }

    #[test]
    fn test_first_failure_wins_and_nothing_is_substituted() {
        let err = text("map(primary) map(nope) map(theme:x)").unwrap_err();
        assert!(matches!(err, ResolveError::KeyPathNotFound { .. }));
    }

    #[test]
    fn test_lookup_empty_path_is_root() {
        let root: Value = serde_yaml::from_str("a: 1").unwrap();
        let value = lookup("t", &root, &KeyPath::default()).unwrap();
        assert_eq!(value, &root);
    }
}
