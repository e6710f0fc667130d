//! Table assembly.
//!
//! This module turns the configured [`TableSource`](crate::TableSource)s into a
//! [`Registry`] of named tables:
//!
//! - [`Registry`]: table name to nested YAML value
//! - [`DocumentLoader`]: reads a table document, [`FsLoader`] from disk
//! - [`assemble`]: builds the registry for one compilation
//!
//! # Naming and precedence
//!
//! A path source is named after its file stem, so `themes/colors.yml` becomes
//! the table `colors`. Identical path strings are loaded once. Inline tables
//! are registered before any document is loaded, so a document replaces an
//! inline table of the same name.

mod assemble;
mod loader;
mod registry;

pub use assemble::{assemble, table_name_for};
pub use loader::{DocumentLoader, FsLoader};
pub use registry::Registry;
