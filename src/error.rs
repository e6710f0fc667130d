//! Crate-level errors.
//!
//! Assembly errors ([`Error::ConfigRead`], [`Error::ConfigParse`],
//! [`Error::InvalidOptions`]) abort the whole compilation. Resolution errors
//! are wrapped in [`Error::Node`] together with the node they came from.

use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeKind;
use crate::resolve::ResolveError;

/// Errors produced while assembling tables or visiting nodes.
///
/// The error is `Clone` so that a failed assembly can be memoized and
/// returned to every caller of the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A table document could not be read from disk.
    #[error("failed to read table \"{}\": {message}", .path.display())]
    ConfigRead { path: PathBuf, message: String },

    /// A table document is not valid YAML.
    #[error("failed to parse table \"{}\": {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The plugin options have an unsupported shape.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A reference inside a node could not be resolved.
    #[error("{kind} `{node}`: {source}")]
    Node {
        kind: NodeKind,
        node: String,
        source: ResolveError,
    },
}

impl Error {
    /// Returns the underlying resolution error, if this is a node error.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Error::Node { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
