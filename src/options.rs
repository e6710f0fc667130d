//! Plugin options.
//!
//! Options can be built in code with the fluent builder or deserialized from
//! YAML/JSON. The `tables` list accepts two shapes, modelled by
//! [`TableSource`]:
//!
//! - a string, the path of a YAML document relative to `basePath`
//! - a mapping of table name to table contents, registered as-is
//!
//! ```rust
//! use stylemap::Options;
//!
//! let options = Options::from_yaml(
//!     r##"
//! tables:
//!   - colors.yml
//!   - theme:
//!       primary: "#fff"
//! defaultTable: colors
//! "##,
//! )
//! .unwrap();
//!
//! assert_eq!(options.default_table_name(), "colors");
//! assert_eq!(options.tables().len(), 2);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Table name used when a reference does not name one.
pub const DEFAULT_TABLE: &str = "config";

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TableSource {
    /// Path of a YAML document. The table is named after the file stem.
    Path(String),
    /// Tables given directly, keyed by table name.
    Inline(BTreeMap<String, Value>),
}

impl From<&str> for TableSource {
    fn from(path: &str) -> Self {
        TableSource::Path(path.to_string())
    }
}

impl From<String> for TableSource {
    fn from(path: String) -> Self {
        TableSource::Path(path)
    }
}

impl From<BTreeMap<String, Value>> for TableSource {
    fn from(tables: BTreeMap<String, Value>) -> Self {
        TableSource::Inline(tables)
    }
}

/// Options for [`MapPlugin`](crate::MapPlugin).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    #[serde(default, alias = "maps")]
    tables: Vec<TableSource>,
    #[serde(default = "default_base_path")]
    base_path: PathBuf,
    #[serde(default = "default_table_name", alias = "defaultMap")]
    default_table: String,
}

fn default_base_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_table_name() -> String {
    DEFAULT_TABLE.to_string()
}

impl Options {
    /// Creates options with no tables, the working directory as base path
    /// and `"config"` as default table.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            base_path: default_base_path(),
            default_table: default_table_name(),
        }
    }

    /// Parses options from a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| Error::InvalidOptions(e.to_string()))
    }

    /// Parses options from a JSON document.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| Error::InvalidOptions(e.to_string()))
    }

    /// Appends a table source, returning the updated options for chaining.
    pub fn table<S: Into<TableSource>>(mut self, source: S) -> Self {
        self.tables.push(source.into());
        self
    }

    /// Appends a single inline table.
    pub fn inline<V: Into<Value>>(mut self, name: &str, table: V) -> Self {
        let mut tables = BTreeMap::new();
        tables.insert(name.to_string(), table.into());
        self.tables.push(TableSource::Inline(tables));
        self
    }

    /// Sets the directory that path sources are resolved against.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Sets the table used by references that do not name one.
    pub fn default_table(mut self, name: &str) -> Self {
        self.default_table = name.to_string();
        self
    }

    /// Returns the configured table sources, in order.
    pub fn tables(&self) -> &[TableSource] {
        &self.tables
    }

    /// Returns the base path as configured.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns the name of the default table.
    pub fn default_table_name(&self) -> &str {
        &self.default_table
    }

    /// Returns the absolute directory path sources are resolved against.
    ///
    /// A relative base path is taken relative to the working directory at the
    /// time of the call. Joining an absolute source onto the result ignores
    /// the base entirely.
    pub fn base_dir(&self) -> PathBuf {
        if self.base_path.is_absolute() {
            self.base_path.clone()
        } else {
            default_base_path().join(&self.base_path)
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
