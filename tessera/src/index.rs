use std::rc::Rc;

use tessera_parser::{Node, Yaml};

/// A trait to index without panicking into a structure through an [`Accessor`].
///
/// [`SafelyIndex`] is implemented on nodes to provide the [`get`] method to conveniently access
/// sequence or mapping elements. This is similar to [`Index`]ing, except that the [`get`] method
/// returns an [`Option`], using [`None`] rather than panicking when the requested index is out of
/// range.
///
/// ```
/// use tessera::SafelyIndex;
///
/// let root = tessera::load("servers: [{host: a}, {host: b}]").unwrap();
/// let servers = root.get("servers");
/// let server = servers.get(1_usize);
/// let host = server.get("host");
/// assert_eq!(host.and_then(|n| n.as_str()), Some("b"));
/// assert!(root.get("clients").get(0_usize).is_none());
/// ```
///
/// [`get`]: SafelyIndex::get
/// [`Index`]: std::ops::Index
pub trait SafelyIndex<N = Self> {
    /// Access a field of the given node.
    ///
    /// # Return
    /// If the given index is valid within `self`, [`Some`] is returned with a reference to the
    /// indexed node. If `self` is not indexable or the index is out of bounds, this function
    /// returns [`None`].
    fn get(&self, key: impl Into<Accessor>) -> Option<&N>;
}

/// A [`SafelyIndex`] accessor.
pub enum Accessor {
    /// Accessing a string field from a mapping.
    Field(String),
    /// Accessing an element from a sequence or a mapping.
    ///
    /// Mappings are looked up with the decimal representation of the index, as that is how
    /// integer keys are stored.
    Index(usize),
}

impl From<usize> for Accessor {
    fn from(val: usize) -> Self {
        Accessor::Index(val)
    }
}

impl From<String> for Accessor {
    fn from(val: String) -> Self {
        Accessor::Field(val)
    }
}

impl From<&str> for Accessor {
    fn from(val: &str) -> Self {
        Accessor::Field(val.to_string())
    }
}

impl SafelyIndex<Rc<Node>> for Node {
    fn get(&self, key: impl Into<Accessor>) -> Option<&Rc<Node>> {
        match (key.into(), &self.yaml) {
            (Accessor::Field(key), Yaml::Mapping(mapping)) => mapping.get(&key),
            (Accessor::Index(index), Yaml::Mapping(mapping)) => mapping.get(&index.to_string()),
            (Accessor::Index(index), Yaml::Sequence(sequence)) => sequence.get(index),
            _ => None,
        }
    }
}

impl SafelyIndex for Rc<Node> {
    fn get(&self, key: impl Into<Accessor>) -> Option<&Rc<Node>> {
        SafelyIndex::get(&**self, key)
    }
}

impl<N: SafelyIndex> SafelyIndex<N> for Option<N> {
    fn get(&self, key: impl Into<Accessor>) -> Option<&N> {
        self.as_ref().and_then(|data| data.get(key))
    }
}

impl<N: SafelyIndex> SafelyIndex<N> for Option<&N> {
    fn get(&self, key: impl Into<Accessor>) -> Option<&N> {
        self.as_ref().and_then(|data| data.get(key))
    }
}
