//! Reading table documents.

use std::path::Path;
use std::sync::Arc;

/// Source of raw table documents.
///
/// The plugin reads every path source through a loader. [`FsLoader`] is the
/// default; other implementations can serve documents from memory or count
/// reads.
pub trait DocumentLoader: Send + Sync {
    /// Reads the document at `path` as UTF-8 text.
    fn load(&self, path: &Path) -> std::io::Result<String>;
}

/// Loads documents from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn load(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for Arc<L> {
    fn load(&self, path: &Path) -> std::io::Result<String> {
        (**self).load(path)
    }
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for &L {
    fn load(&self, path: &Path) -> std::io::Result<String> {
        (**self).load(path)
    }
}
