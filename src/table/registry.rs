//! Named-table registry.

use std::collections::BTreeMap;

use serde_yaml::Value;

/// The set of tables available to references during one compilation.
///
/// Built once by [`assemble`](super::assemble) and read-only afterwards.
/// Inserting under an existing name replaces the previous table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    tables: BTreeMap<String, Value>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table, replacing any table with the same name.
    pub fn insert(&mut self, name: impl Into<String>, table: Value) {
        self.tables.insert(name.into(), table);
    }

    /// Looks up a table by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.tables.get(name)
    }

    /// Returns true if a table with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns the number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns an iterator over all registered table names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|s| s.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Registry {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for (name, table) in iter {
            registry.insert(name, table);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_insert_and_get() {
        let mut registry = Registry::new();
        registry.insert("colors", Value::from("red"));

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.contains("colors"));
        assert_eq!(registry.get("colors"), Some(&Value::from("red")));
        assert_eq!(registry.get("missing"), None);
    }

    #[test]
    fn test_registry_insert_overwrites() {
        let mut registry = Registry::new();
        registry.insert("colors", Value::from("first"));
        registry.insert("colors", Value::from("second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("colors"), Some(&Value::from("second")));
    }

    #[test]
    fn test_registry_names() {
        let registry: Registry = [
            ("b", Value::Null),
            ("brand.v2", Value::Null),
            ("a", Value::Null),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["a", "b", "brand.v2"]);
    }
}
