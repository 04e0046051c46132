//! The types schemas are assembled from.
//!
//! Every type is a [`YamlType`](tessera_parser::YamlType) built by a function of one of the
//! submodules. Types with different definitions depending on the schema (e.g.: `int`) have one
//! function per flavour.

use tessera_parser::{Scalar, Yaml};

pub mod binary;
pub mod boolean;
pub mod collections;
pub mod failsafe;
pub mod float;
pub mod int;
pub mod merge;
pub mod null;
pub mod timestamp;

/// Expand to the tag URI of a type of the `tag:yaml.org,2002:` namespace.
macro_rules! yaml_tag {
    ($name:literal) => {
        concat!("tag:yaml.org,2002:", $name)
    };
}
pub(crate) use yaml_tag;

/// Return the text of a scalar node.
///
/// An empty node (only possible with an explicit tag) is the empty string.
pub(crate) fn text(yaml: &Yaml) -> Option<&str> {
    match yaml {
        Yaml::Value(Scalar::String(s)) => Some(s),
        Yaml::Value(Scalar::Null) => Some(""),
        _ => None,
    }
}

/// Wrap a scalar into a [`Yaml`] value.
pub(crate) fn value(scalar: Scalar) -> Yaml {
    Yaml::Value(scalar)
}
