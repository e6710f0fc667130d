//! Style sheet nodes as seen by the visitor.
//!
//! The host pipeline owns its syntax tree. This crate only needs two
//! capabilities from it, expressed as traits:
//!
//! - [`AtRuleNode`]: a rule header such as `@media screen`, with mutable
//!   parameter text and the ability to remove itself from its parent
//! - [`DeclarationNode`]: a `property: value` pair with a mutable value
//!
//! [`VisitedNode`] joins the two into one tagged value so that text
//! extraction and rewriting are written once. [`AtRule`] and [`Declaration`]
//! are simple owned implementations for hosts without a tree of their own,
//! and for tests.

mod simple;

use std::fmt;

pub use simple::{AtRule, Declaration};

/// A rule header (at-rule) in the host's tree.
pub trait AtRuleNode {
    /// Rule name without the `@`, e.g. `media`.
    fn name(&self) -> &str;
    /// Parameter text after the name, e.g. `screen and (min-width: 40em)`.
    fn params(&self) -> &str;
    /// Replaces the parameter text.
    fn set_params(&mut self, params: String);
    /// Removes the rule, and everything inside it, from its parent.
    fn remove(&mut self);
}

/// A property/value declaration in the host's tree.
pub trait DeclarationNode {
    /// Property name, e.g. `color`.
    fn prop(&self) -> &str;
    /// Value text, e.g. `map(primary)`.
    fn value(&self) -> &str;
    /// Replaces the value text.
    fn set_value(&mut self, value: String);
}

/// The two node kinds references are resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    RuleHeader,
    Declaration,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::RuleHeader => f.write_str("rule header"),
            NodeKind::Declaration => f.write_str("declaration"),
        }
    }
}

/// A node handed to the visitor, tagged by kind.
pub enum VisitedNode<'n> {
    RuleHeader(&'n mut dyn AtRuleNode),
    Declaration(&'n mut dyn DeclarationNode),
}

impl VisitedNode<'_> {
    /// Returns the node's kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            VisitedNode::RuleHeader(_) => NodeKind::RuleHeader,
            VisitedNode::Declaration(_) => NodeKind::Declaration,
        }
    }

    /// Returns the text references are resolved in: parameters or value.
    pub fn text(&self) -> &str {
        match self {
            VisitedNode::RuleHeader(rule) => rule.params(),
            VisitedNode::Declaration(decl) => decl.value(),
        }
    }

    /// Replaces the text returned by [`text`](Self::text).
    pub fn set_text(&mut self, text: String) {
        match self {
            VisitedNode::RuleHeader(rule) => rule.set_params(text),
            VisitedNode::Declaration(decl) => decl.set_value(text),
        }
    }

    /// Renders the node roughly as written, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            VisitedNode::RuleHeader(rule) => format!("@{} {}", rule.name(), rule.params()),
            VisitedNode::Declaration(decl) => format!("{}: {}", decl.prop(), decl.value()),
        }
    }
}

impl fmt::Debug for VisitedNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitedNode")
            .field("kind", &self.kind())
            .field("node", &self.describe())
            .finish()
    }
}
