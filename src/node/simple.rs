//! Owned node implementations.

use super::{AtRuleNode, DeclarationNode};

/// An at-rule that records its own removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    name: String,
    params: String,
    removed: bool,
}

impl AtRule {
    /// Creates an at-rule, e.g. `AtRule::new("media", "print")`.
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            removed: false,
        }
    }

    /// Returns true once [`AtRuleNode::remove`] has been called.
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl AtRuleNode for AtRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> &str {
        &self.params
    }

    fn set_params(&mut self, params: String) {
        self.params = params;
    }

    fn remove(&mut self) {
        self.removed = true;
    }
}

/// A property/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    prop: String,
    value: String,
}

impl Declaration {
    /// Creates a declaration, e.g. `Declaration::new("color", "map(primary)")`.
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
        }
    }
}

impl DeclarationNode for Declaration {
    fn prop(&self) -> &str {
        &self.prop
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }
}
