// Copyright 2015, Yuheng Chen.
// Copyright 2023, Ethiraric.
// See the LICENSE file at the top-level directory of this distribution.

//! A YAML loader composing documents into trees of shared nodes.
//!
//! # Usage
//!
//! ```
//! let root = tessera::load("
//! base: &base
//!   retries: 3
//!   timeout: 1.5
//! service:
//!   <<: *base
//!   retries: 5
//! ").unwrap();
//!
//! let service = root.get_key("service").unwrap();
//! assert_eq!(service.get_key("retries").unwrap().as_integer(), Some(5));
//! assert_eq!(service.get_key("timeout").unwrap().as_floating_point(), Some(1.5));
//! ```
//!
//! Documents are composed into [`Node`]s. Each node holds its content ([`Yaml`]) and the tag it
//! was resolved with. Nodes are reference counted: an alias is the very node of its anchor.
//!
//! # Schemas
//! Plain scalars are resolved by the implicit types of a [`Schema`], and explicitly tagged nodes
//! by its explicit types. The [`schema`] module ships the usual ones:
//!   - [`schema::failsafe`]: everything is a string, sequence or mapping.
//!   - [`schema::json`] and [`schema::core`]: the YAML 1.2 schemas.
//!   - [`schema::default_safe`]: the YAML 1.1 flavoured types (`0b1010`, `1_000`, `1:30`, `<<`,
//!     `!!binary`, `!!set`, ...). This is the schema of the `safe_load*` functions.
//!   - [`schema::default_full`]: [`schema::default_safe`] with timestamps. This is the schema of
//!     the `load*` functions.
//!
//! Other schemas are loaded with [`load_all_with`] and [`load_with`].
//!
//! # Errors and warnings
//! Errors carry the position they were raised at, along with an excerpt of the input:
//!
//! ```
//! let error = tessera::load("key: [a, b").unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "unexpected end of the stream within a flow collection at line 1, column 11"
//! );
//! ```
//!
//! Problems that do not prevent loading (e.g.: an unknown tag) are warnings. They are emitted
//! through `tracing` unless a callback is given with [`Options::on_warning`], and turned into
//! errors with [`Options::strict`].
//!
//! # Features
//!
//! #### `miette`
//! Enables the `miette` module, turning a [`ScanError`] into a `miette::Report`.

#![warn(missing_docs, clippy::pedantic)]

mod index;
pub mod schema;
pub mod types;

use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use thiserror::Error;

pub use crate::index::{Accessor, SafelyIndex};

#[cfg(feature = "miette")]
pub use tessera_parser::miette;
pub use tessera_parser::{
    load_all_with, load_with, Abort, ErrorKind, Kind, Mapping, Marker, Node, Options, Resolver,
    Scalar, ScanError, Schema, Sequence, Warning, WarningSink, Yaml, YamlType, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_KEY_LENGTH, MERGE_TAG,
};

/// An error raised by [`load_file`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The path to the file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The file is not valid YAML.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Load every document of `input` with the [`schema::default_full`] schema.
///
/// `on_document` is called with the root of each document, in order. Returning an [`Abort`] from
/// it stops loading.
///
/// # Errors
/// Returns an error if `input` is not valid YAML or if `on_document` aborted. Documents before the
/// faulty one have already been handed to `on_document`.
pub fn load_all<F>(input: &str, on_document: F) -> Result<(), ScanError>
where
    F: FnMut(Rc<Node>) -> Result<(), Abort>,
{
    load_all_with_options(input, &Options::default(), on_document)
}

/// Load every document of `input` with the [`schema::default_full`] schema.
///
/// # Errors
/// See [`load_all`].
pub fn load_all_with_options<F>(
    input: &str,
    options: &Options,
    on_document: F,
) -> Result<(), ScanError>
where
    F: FnMut(Rc<Node>) -> Result<(), Abort>,
{
    load_all_with(input, schema::default_full(), options, on_document)
}

/// Load every document of `input` with the [`schema::default_full`] schema into a [`Vec`].
///
/// # Errors
/// Returns an error if `input` is not valid YAML.
pub fn load_all_to_vec(input: &str) -> Result<Vec<Rc<Node>>, ScanError> {
    let mut documents = vec![];
    load_all(input, |document| {
        documents.push(document);
        Ok(())
    })?;
    Ok(documents)
}

/// Load the single document of `input` with the [`schema::default_full`] schema.
///
/// # Errors
/// Returns an error if `input` is not valid YAML, or does not contain exactly one document.
pub fn load(input: &str) -> Result<Rc<Node>, ScanError> {
    load_with_options(input, &Options::default())
}

/// Load the single document of `input` with the [`schema::default_full`] schema.
///
/// # Errors
/// See [`load`].
pub fn load_with_options(input: &str, options: &Options) -> Result<Rc<Node>, ScanError> {
    load_with(input, schema::default_full(), options)
}

/// Load every document of `input` with the [`schema::default_safe`] schema.
///
/// # Errors
/// See [`load_all`].
pub fn safe_load_all<F>(input: &str, on_document: F) -> Result<(), ScanError>
where
    F: FnMut(Rc<Node>) -> Result<(), Abort>,
{
    safe_load_all_with_options(input, &Options::default(), on_document)
}

/// Load every document of `input` with the [`schema::default_safe`] schema.
///
/// # Errors
/// See [`load_all`].
pub fn safe_load_all_with_options<F>(
    input: &str,
    options: &Options,
    on_document: F,
) -> Result<(), ScanError>
where
    F: FnMut(Rc<Node>) -> Result<(), Abort>,
{
    load_all_with(input, schema::default_safe(), options, on_document)
}

/// Load the single document of `input` with the [`schema::default_safe`] schema.
///
/// # Errors
/// See [`load`].
pub fn safe_load(input: &str) -> Result<Rc<Node>, ScanError> {
    safe_load_with_options(input, &Options::default())
}

/// Load the single document of `input` with the [`schema::default_safe`] schema.
///
/// # Errors
/// See [`load`].
pub fn safe_load_with_options(input: &str, options: &Options) -> Result<Rc<Node>, ScanError> {
    load_with(input, schema::default_safe(), options)
}

/// Read the file at `path` and load its single document with the [`schema::default_full`]
/// schema.
///
/// Unless `options` already names one, errors and warnings refer to the file by its path.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid YAML, or does not contain exactly
/// one document.
pub fn load_file(path: impl AsRef<Path>, options: &Options) -> Result<Rc<Node>, LoadError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading YAML file");
    let input = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let node = if options.get_filename().is_some() {
        load_with_options(&input, options)?
    } else {
        let options = options.clone().filename(path.display().to_string());
        load_with_options(&input, &options)?
    };
    Ok(node)
}
