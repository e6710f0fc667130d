//! Reference resolution.
//!
//! Style text refers to table values with `map()` calls. This module finds
//! those calls, parses them into [`Reference`]s and resolves them against a
//! [`Registry`](crate::table::Registry):
//!
//! - [`find_references`]: locate and parse every `map()` call in a string
//! - [`resolve`]: resolve every reference in a string
//! - [`rewrite`]: substitute the results into the string in one pass
//! - [`lookup`]: walk a [`KeyPath`] through a single table
//!
//! Everything here is pure: the same registry and text always give the same
//! result.
//!
//! # Failure order
//!
//! 1. Malformed reference text: [`ResolveError::InvalidKeyPath`]
//! 2. No key path: [`ResolveError::EmptyKeyPath`]
//! 3. Table not registered: [`ResolveError::UnknownTable`]
//! 4. Path does not lead anywhere: [`ResolveError::KeyPathNotFound`]
//! 5. Value needed as text but is null or structured: [`ResolveError::NotScalar`]

mod engine;
mod error;
mod path;
mod reference;
mod value;

pub use engine::{lookup, resolve, resolve_reference, rewrite, Resolution, Resolved};
pub use error::ResolveError;
pub use path::{KeyPath, Segment};
pub use reference::{find_references, Occurrence, Reference, FUNCTION_NAME};
pub use value::ResolvedValue;
