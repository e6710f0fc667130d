//! Applying resolved references to nodes.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::node::{AtRuleNode, DeclarationNode, NodeKind, VisitedNode};
use crate::resolve::{resolve, rewrite, Resolution, ResolveError};
use crate::table::Registry;

/// Rewrites references in nodes using one compilation's tables.
///
/// # Example
///
/// ```rust
/// use stylemap::{Declaration, DeclarationNode, Visitor};
/// use stylemap::table::Registry;
///
/// let mut registry = Registry::new();
/// registry.insert("colors", serde_yaml::from_str("primary: '#fff'").unwrap());
/// let visitor = Visitor::new(registry, "colors");
///
/// let mut decl = Declaration::new("color", "map(primary)");
/// visitor.process_decl(&mut decl).unwrap();
/// assert_eq!(decl.value(), "#fff");
/// ```
#[derive(Debug, Clone)]
pub struct Visitor {
    registry: Registry,
    default_table: String,
}

impl Visitor {
    /// Creates a visitor over an assembled registry.
    pub fn new(registry: Registry, default_table: impl Into<String>) -> Self {
        Self {
            registry,
            default_table: default_table.into(),
        }
    }

    /// Returns the tables this visitor resolves against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the table used by references that do not name one.
    pub fn default_table(&self) -> &str {
        &self.default_table
    }

    /// Resolves references in a rule header's parameters.
    ///
    /// If the parameters are a single reference whose value is empty (null,
    /// `false`, `""`, `{}` or `[]`), the rule is removed instead. A reference
    /// to a missing key is an error, not an empty value.
    pub fn process_at_rule(&self, rule: &mut dyn AtRuleNode) -> Result<()> {
        self.process(VisitedNode::RuleHeader(rule))
    }

    /// Resolves references in a declaration's value.
    pub fn process_decl(&self, decl: &mut dyn DeclarationNode) -> Result<()> {
        self.process(VisitedNode::Declaration(decl))
    }

    /// Resolves references in any visited node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Node`] if any reference fails, or resolves to a value
    /// with no textual form. The node is left untouched in that case.
    pub fn process(&self, mut node: VisitedNode<'_>) -> Result<()> {
        let text = node.text().to_string();
        let resolutions = resolve(&self.registry, &self.default_table, &text);
        if resolutions.is_empty() {
            return Ok(());
        }

        if node.kind() == NodeKind::RuleHeader && is_sole_reference(&text, &resolutions) {
            match &resolutions[0].result {
                Ok(resolved) if resolved.value.is_empty() => {
                    if let VisitedNode::RuleHeader(rule) = &mut node {
                        trace!(rule = %rule.name(), params = %text, "removing rule");
                        rule.remove();
                    }
                    return Ok(());
                }
                Err(err) => return Err(node_error(&node, err.clone())),
                Ok(_) => {}
            }
        }

        let rewritten = rewrite(&text, &resolutions).map_err(|err| node_error(&node, err))?;
        trace!(kind = %node.kind(), from = %text, to = %rewritten, "rewrote node");
        node.set_text(rewritten);
        Ok(())
    }
}

/// True if `text` is exactly one reference, ignoring surrounding whitespace.
fn is_sole_reference(text: &str, resolutions: &[Resolution]) -> bool {
    match resolutions {
        [only] => &text[only.span.clone()] == text.trim(),
        _ => false,
    }
}

fn node_error(node: &VisitedNode<'_>, source: ResolveError) -> Error {
    let kind = node.kind();
    let described = node.describe();
    debug!(%kind, node = %described, error = %source, "failed to resolve reference");
    Error::Node {
        kind,
        node: described,
        source,
    }
}
