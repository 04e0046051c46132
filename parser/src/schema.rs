//! The interface of type-resolution schemas.
//!
//! A [`Schema`] is plain data: a list of types tried in order on untagged plain scalars, and a
//! table of types looked up by tag for explicitly tagged nodes. The concrete schemas live in the
//! `tessera` crate.

use std::{borrow::Cow, fmt};

use hashlink::LinkedHashMap;

use crate::{Kind, Yaml};

/// Construct the value of a node of a given type.
///
/// The first argument is the content of the node as composed: a [`Scalar::String`] for scalars
/// (or [`Scalar::Null`] for empty nodes), or the composed collection. The second argument tells
/// whether the type was requested explicitly with a tag (`true`) or is being tried on a plain
/// scalar (`false`).
///
/// # Return
/// Returns [`None`] if the content does not represent a value of the type.
///
/// [`Scalar::String`]: crate::Scalar::String
/// [`Scalar::Null`]: crate::Scalar::Null
pub type Resolver = fn(&Yaml, bool) -> Option<Yaml>;

/// A type of a schema.
#[derive(Clone)]
pub struct YamlType {
    /// The tag URI of the type (e.g.: `tag:yaml.org,2002:int`).
    pub tag: Cow<'static, str>,
    /// The kind of node the type applies to.
    pub kind: Kind,
    /// The function constructing the value, or [`None`] to keep the content as-is.
    pub resolver: Option<Resolver>,
}

impl YamlType {
    /// Create a new type.
    #[must_use]
    pub fn new(tag: impl Into<Cow<'static, str>>, kind: Kind, resolver: Option<Resolver>) -> Self {
        Self {
            tag: tag.into(),
            kind,
            resolver,
        }
    }

    /// Run the resolver of the type on `yaml`.
    ///
    /// Types without a resolver accept any content unchanged.
    #[must_use]
    pub fn resolve(&self, yaml: &Yaml, explicit: bool) -> Option<Yaml> {
        match self.resolver {
            Some(resolver) => resolver(yaml, explicit),
            None => Some(yaml.clone()),
        }
    }
}

impl fmt::Debug for YamlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlType")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

/// A set of types nodes are resolved against.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    implicit: Vec<YamlType>,
    explicit: LinkedHashMap<String, YamlType>,
}

impl Schema {
    /// Create an empty schema.
    ///
    /// An empty schema leaves plain scalars as strings and warns about every explicit tag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type tried on untagged plain scalars, after the ones already added.
    ///
    /// The type is also registered for explicit tags.
    #[must_use]
    pub fn with_implicit(mut self, ty: YamlType) -> Self {
        self.explicit.insert(ty.tag.to_string(), ty.clone());
        self.implicit.push(ty);
        self
    }

    /// Add a type only used for explicitly tagged nodes.
    ///
    /// A type with the same tag replaces the previous one for explicit tags.
    #[must_use]
    pub fn with_explicit(mut self, ty: YamlType) -> Self {
        self.explicit.insert(ty.tag.to_string(), ty);
        self
    }

    /// Add every type of `other` to `self`.
    ///
    /// Implicit types of `other` are tried after those of `self`.
    #[must_use]
    pub fn extend(mut self, other: &Schema) -> Self {
        self.implicit.extend(other.implicit.iter().cloned());
        for (tag, ty) in &other.explicit {
            self.explicit.insert(tag.clone(), ty.clone());
        }
        self
    }

    /// Remove the type registered under `tag`, both as an implicit and an explicit type.
    #[must_use]
    pub fn without(mut self, tag: &str) -> Self {
        self.implicit.retain(|ty| ty.tag != tag);
        self.explicit.remove(tag);
        self
    }

    /// Return the types tried on untagged plain scalars, in order.
    #[must_use]
    pub fn implicit(&self) -> &[YamlType] {
        &self.implicit
    }

    /// Return the type registered for the explicit tag `tag`.
    #[must_use]
    pub fn explicit(&self, tag: &str) -> Option<&YamlType> {
        self.explicit.get(tag)
    }

    /// Return an iterator over the tags known to the schema.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.explicit.keys().map(String::as_str)
    }
}
