//! Registry assembly from configured sources.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use super::loader::DocumentLoader;
use super::registry::Registry;
use crate::error::{Error, Result};
use crate::options::{Options, TableSource};

/// Builds the registry for one compilation.
///
/// Inline tables are registered first, in configured order. Path sources are
/// then deduplicated by their literal string (first occurrence wins),
/// resolved against the base path and parsed as YAML in configured order, so
/// a document replaces an inline table of the same name.
///
/// # Errors
///
/// Any read or parse failure fails the whole assembly; no partial registry is
/// returned.
pub fn assemble(options: &Options, loader: &dyn DocumentLoader) -> Result<Registry> {
    let (paths, inline) = partition(options.tables());

    debug!(
        sources = options.tables().len(),
        paths = paths.len(),
        inline = inline.len(),
        "assembling tables"
    );

    let mut registry = Registry::new();

    for tables in inline {
        for (name, table) in tables {
            registry.insert(name.clone(), table.clone());
        }
    }

    let base = options.base_dir();
    for source in paths {
        let name = table_name_for(source)?;
        let location = base.join(source);
        let table = load_table(loader, &location)?;
        debug!(table = %name, path = %location.display(), "loaded table");
        registry.insert(name, table);
    }

    debug!(
        tables = ?registry.names().collect::<Vec<_>>(),
        "tables assembled"
    );

    Ok(registry)
}

/// Derives a table name from a path source: its file name without extension.
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] if the path has no file name.
pub fn table_name_for(source: &str) -> Result<String> {
    Path::new(source)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidOptions(format!("table path \"{}\" has no file name", source)))
}

/// Splits sources into unique path strings and inline tables, keeping order.
fn partition(sources: &[TableSource]) -> (Vec<&str>, Vec<&BTreeMap<String, Value>>) {
    let mut paths: Vec<&str> = Vec::new();
    let mut inline = Vec::new();

    for source in sources {
        match source {
            TableSource::Path(path) => {
                if !paths.contains(&path.as_str()) {
                    paths.push(path);
                }
            }
            TableSource::Inline(tables) => inline.push(tables),
        }
    }

    (paths, inline)
}

fn load_table(loader: &dyn DocumentLoader, path: &Path) -> Result<Value> {
    let text = loader.load(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FsLoader;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Serves documents from memory and records every read.
    #[derive(Default)]
    struct MemoryLoader {
        documents: HashMap<PathBuf, String>,
        reads: Mutex<Vec<PathBuf>>,
    }

    impl MemoryLoader {
        fn with(mut self, path: &str, text: &str) -> Self {
            self.documents.insert(PathBuf::from(path), text.to_string());
            self
        }

        fn reads(&self) -> Vec<PathBuf> {
            self.reads.lock().unwrap().clone()
        }
    }

    impl DocumentLoader for MemoryLoader {
        fn load(&self, path: &Path) -> std::io::Result<String> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.documents.get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such document")
            })
        }
    }

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_table_name_for() {
        assert_eq!(table_name_for("colors.yml").unwrap(), "colors");
        assert_eq!(table_name_for("themes/dark.yaml").unwrap(), "dark");
        assert_eq!(table_name_for("/abs/path/sizes.yml").unwrap(), "sizes");
        assert_eq!(table_name_for("a.b.yml").unwrap(), "a.b");
        assert_eq!(table_name_for("noext").unwrap(), "noext");
        assert!(matches!(table_name_for(""), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_assemble_path_source() {
        let loader = MemoryLoader::default().with("/styles/colors.yml", "primary: '#fff'\n");
        let options = Options::new().base_path("/styles").table("colors.yml");

        let registry = assemble(&options, &loader).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("colors"), Some(&yaml("primary: '#fff'")));
    }

    #[test]
    fn test_assemble_dedups_identical_paths() {
        let loader = MemoryLoader::default().with("/styles/colors.yml", "primary: red\n");
        let options = Options::new()
            .base_path("/styles")
            .table("colors.yml")
            .table("colors.yml");

        assemble(&options, &loader).unwrap();

        assert_eq!(loader.reads(), vec![PathBuf::from("/styles/colors.yml")]);
    }

    #[test]
    fn test_assemble_loads_in_configured_order() {
        let loader = MemoryLoader::default()
            .with("/s/b.yml", "x: 1\n")
            .with("/s/a.yml", "x: 2\n");
        let options = Options::new()
            .base_path("/s")
            .table("b.yml")
            .table("a.yml")
            .table("b.yml");

        assemble(&options, &loader).unwrap();

        assert_eq!(
            loader.reads(),
            vec![PathBuf::from("/s/b.yml"), PathBuf::from("/s/a.yml")]
        );
    }

    #[test]
    fn test_assemble_later_path_overwrites_same_name() {
        let loader = MemoryLoader::default()
            .with("/s/light/colors.yml", "bg: white\n")
            .with("/s/dark/colors.yml", "bg: black\n");
        let options = Options::new()
            .base_path("/s")
            .table("light/colors.yml")
            .table("dark/colors.yml");

        let registry = assemble(&options, &loader).unwrap();

        assert_eq!(registry.get("colors"), Some(&yaml("bg: black")));
    }

    #[test]
    fn test_assemble_path_replaces_inline() {
        let loader = MemoryLoader::default().with("/s/colors.yml", "primary: red\n");
        let options = Options::new()
            .base_path("/s")
            .table("colors.yml")
            .inline("colors", yaml("primary: blue"));

        let registry = assemble(&options, &loader).unwrap();

        assert_eq!(registry.get("colors"), Some(&yaml("primary: red")));
    }

    #[test]
    fn test_assemble_relative_base_resolved_once() {
        let cwd = std::env::current_dir().unwrap();
        let loader = MemoryLoader::default()
            .with(cwd.join("styles/a.yml").to_str().unwrap(), "x: 1\n")
            .with(cwd.join("styles/b.yml").to_str().unwrap(), "x: 2\n");
        let options = Options::new()
            .base_path("styles")
            .table("a.yml")
            .table("b.yml");

        let registry = assemble(&options, &loader).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            loader.reads(),
            vec![cwd.join("styles/a.yml"), cwd.join("styles/b.yml")]
        );
    }

    #[test]
    fn test_assemble_later_inline_overwrites_earlier() {
        let loader = MemoryLoader::default();
        let options = Options::new()
            .inline("theme", "first")
            .inline("theme", "second");

        let registry = assemble(&options, &loader).unwrap();

        assert_eq!(registry.get("theme"), Some(&Value::from("second")));
        assert!(loader.reads().is_empty());
    }

    #[test]
    fn test_assemble_read_error_is_fatal() {
        let loader = MemoryLoader::default().with("/s/a.yml", "x: 1\n");
        let options = Options::new()
            .base_path("/s")
            .table("a.yml")
            .table("missing.yml");

        let result = assemble(&options, &loader);

        match result {
            Err(Error::ConfigRead { path, .. }) => {
                assert_eq!(path, PathBuf::from("/s/missing.yml"));
            }
            other => panic!("Expected ConfigRead, got {:?}", other),
        }
    }

    #[test]
    fn test_assemble_parse_error_includes_path() {
        let loader = MemoryLoader::default().with("/s/bad.yml", "key: [unclosed\n");
        let options = Options::new().base_path("/s").table("bad.yml");

        let err = assemble(&options, &loader).unwrap_err();

        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("/s/bad.yml"));
    }

    #[test]
    fn test_assemble_empty_document_is_null() {
        let loader = MemoryLoader::default().with("/s/empty.yml", "\n");
        let options = Options::new().base_path("/s").table("empty.yml");

        let registry = assemble(&options, &loader).unwrap();

        assert_eq!(registry.get("empty"), Some(&Value::Null));
    }

    #[test]
    fn test_assemble_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sizes.yml"), "small: 4px\nlarge: 16px\n").unwrap();
        let options = Options::new().base_path(dir.path()).table("sizes.yml");

        let registry = assemble(&options, &FsLoader).unwrap();

        assert_eq!(registry.get("sizes"), Some(&yaml("small: 4px\nlarge: 16px")));
    }
}
