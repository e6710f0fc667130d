//! The pipeline-facing plugin.
//!
//! A [`MapPlugin`] is created once per compilation. Tables are assembled the
//! first time either entry point runs, and the resulting [`Visitor`] is reused
//! for every later node. Concurrent first calls share a single assembly; a
//! failed assembly is kept and returned to every caller.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::Result;
use crate::node::{AtRuleNode, DeclarationNode, VisitedNode};
use crate::options::Options;
use crate::table::{assemble, DocumentLoader, FsLoader};
use crate::visitor::Visitor;

/// Resolves `map()` references for one compilation.
///
/// # Example
///
/// ```rust
/// use stylemap::{Declaration, DeclarationNode, MapPlugin, Options};
///
/// let options = Options::new()
///     .inline("colors", serde_yaml::from_str::<serde_yaml::Value>("primary: '#fff'").unwrap())
///     .default_table("colors");
/// let plugin = MapPlugin::new(options);
///
/// let mut decl = Declaration::new("color", "map(primary)");
/// plugin.declaration(&mut decl).unwrap();
/// assert_eq!(decl.value(), "#fff");
/// ```
pub struct MapPlugin {
    options: Options,
    loader: Box<dyn DocumentLoader>,
    visitor: OnceCell<Result<Visitor>>,
}

impl MapPlugin {
    /// Creates a plugin that reads table documents from disk.
    pub fn new(options: Options) -> Self {
        Self::with_loader(options, FsLoader)
    }

    /// Creates a plugin that reads table documents through `loader`.
    pub fn with_loader(options: Options, loader: impl DocumentLoader + 'static) -> Self {
        Self {
            options,
            loader: Box::new(loader),
            visitor: OnceCell::new(),
        }
    }

    /// Returns the plugin's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the visitor, assembling the tables on first use.
    ///
    /// # Errors
    ///
    /// Returns the assembly error, the same one on every call.
    pub fn visitor(&self) -> Result<&Visitor> {
        self.visitor
            .get_or_init(|| {
                debug!(default_table = %self.options.default_table_name(), "building visitor");
                assemble(&self.options, self.loader.as_ref())
                    .map(|registry| Visitor::new(registry, self.options.default_table_name()))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Entry point for rule headers.
    pub fn at_rule(&self, rule: &mut dyn AtRuleNode) -> Result<()> {
        self.visitor()?.process_at_rule(rule)
    }

    /// Entry point for declarations.
    pub fn declaration(&self, decl: &mut dyn DeclarationNode) -> Result<()> {
        self.visitor()?.process_decl(decl)
    }

    /// Entry point for an already tagged node.
    pub fn visit(&self, node: VisitedNode<'_>) -> Result<()> {
        self.visitor()?.process(node)
    }
}

impl std::fmt::Debug for MapPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapPlugin")
            .field("options", &self.options)
            .field("assembled", &self.visitor.get().is_some())
            .finish()
    }
}
