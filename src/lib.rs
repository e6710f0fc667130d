//! # stylemap
//!
//! Build-time substitution of lookup-table values into style sheets.
//!
//! Style text refers to values in YAML tables with `map()` calls:
//!
//! ```css
//! .button {
//!   color: map(brand.primary);
//!   padding: map(spacing:base) map(spacing:wide);
//! }
//!
//! @media map(breakpoints.print) { }
//! ```
//!
//! Tables come from YAML documents on disk (named after their file stem) or
//! from inline objects in the options. The plugin replaces each reference
//! with the value it names, and fails the compilation if any reference does
//! not resolve.
//!
//! ## Quick start
//!
//! ```rust
//! use stylemap::{AtRule, AtRuleNode, Declaration, DeclarationNode, MapPlugin, Options};
//!
//! let options = Options::from_yaml(
//!     r##"
//! tables:
//!   - colors:
//!       brand: { primary: "#000" }
//!     features:
//!       print: false
//! defaultTable: colors
//! "##,
//! )
//! .unwrap();
//!
//! let plugin = MapPlugin::new(options);
//!
//! let mut decl = Declaration::new("color", "map(brand.primary)");
//! plugin.declaration(&mut decl).unwrap();
//! assert_eq!(decl.value(), "#000");
//!
//! let mut rule = AtRule::new("media", "map(features:print)");
//! plugin.at_rule(&mut rule).unwrap();
//! assert!(rule.is_removed());
//! ```
//!
//! ## Modules
//!
//! - [`options`]: plugin options and table sources
//! - [`table`]: assembling the table registry
//! - [`resolve`]: parsing and resolving references (pure)
//! - [`node`]: the node capabilities the host provides
//! - [`Visitor`] / [`MapPlugin`]: applying results to nodes

pub mod error;
pub mod node;
pub mod options;
mod plugin;
pub mod resolve;
pub mod table;
mod visitor;

pub use error::{Error, Result};
pub use node::{AtRule, AtRuleNode, Declaration, DeclarationNode, NodeKind, VisitedNode};
pub use options::{Options, TableSource, DEFAULT_TABLE};
pub use plugin::MapPlugin;
pub use resolve::{ResolveError, ResolvedValue};
pub use table::{DocumentLoader, FsLoader, Registry};
pub use visitor::Visitor;
