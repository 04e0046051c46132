// Copyright 2015, Yuheng Chen.
// Copyright 2023, Ethiraric.
// See the LICENSE file at the top-level directory of this distribution.

//! The composing engine behind `tessera`.
//!
//! **If you want to load YAML into nodes with the usual types resolved, use `tessera` instead of
//! `tessera-parser`. This crate contains the engine and a schema interface, but no schema.**
//!
//! This crate turns a YAML text stream into a tree of [`Node`]s, one per document. Nodes are
//! composed directly from the characters of the input: there is no intermediate token or event
//! stream. Each node carries the tag it was resolved with, and plain scalars are resolved by the
//! types of the [`Schema`] given to the loader.
//!
//! # Usage
//!
//! ```
//! use tessera_parser::{load_with, Kind, Options, Schema, YamlType};
//!
//! let schema = Schema::new().with_explicit(YamlType::new("!list", Kind::Sequence, None));
//! let root = load_with("items: !list [a, b]", &schema, &Options::default()).unwrap();
//! let items = root.get_key("items").unwrap();
//! assert_eq!(items.tag(), Some("!list"));
//! assert_eq!(items.get_index(0).and_then(|n| n.as_str()), Some("a"));
//! ```
//!
//! # Features
//!
//! #### `miette`
//! Enables the `miette` module, turning a [`ScanError`] into a `miette::Report` pointing at the
//! error in the source.

#![warn(missing_docs, clippy::pedantic)]

#[macro_use]
mod macros;

mod char_traits;
mod collection;
mod composer;
mod document;
mod error;
#[cfg(feature = "miette")]
pub mod miette;
mod node;
mod options;
mod properties;
mod scalar;
mod schema;
mod state;

pub use crate::collection::MERGE_TAG;
pub use crate::document::{load_all_with, load_with};
pub use crate::error::{Abort, ErrorKind, Marker, ScanError, Warning};
pub use crate::node::{Kind, Mapping, Node, Scalar, Sequence, Yaml};
pub use crate::options::{Options, WarningSink, DEFAULT_MAX_DEPTH, DEFAULT_MAX_KEY_LENGTH};
pub use crate::schema::{Resolver, Schema, YamlType};
