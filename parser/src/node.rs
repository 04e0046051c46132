//! The tree of nodes a YAML document is composed into.

use std::{fmt::Write, rc::Rc};

use hashlink::LinkedHashMap;
use ordered_float::OrderedFloat;

/// The resolved value of a scalar YAML node.
///
/// Before type resolution, every scalar is a [`Scalar::String`] (or [`Scalar::Null`] for empty
/// nodes). The schema then turns them into the other variants.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Scalar {
    /// A null value ([10.2.1.1 Null](https://yaml.org/spec/1.2.2/#null)).
    Null,
    /// A boolean value ([10.2.1.2 Boolean](https://yaml.org/spec/1.2.2/#boolean)).
    Boolean(bool),
    /// An integer value ([10.2.1.3 Integer](https://yaml.org/spec/1.2.2/#integer)).
    Integer(i64),
    /// A floating point value ([10.2.1.4 Floating
    /// Point](https://yaml.org/spec/1.2.2/#floating-point)).
    FloatingPoint(OrderedFloat<f64>),
    /// A string ([10.1.1.3 Generic String](https://yaml.org/spec/1.2.2/#generic-string)).
    String(String),
    /// Raw bytes, as produced by the `!!binary` type.
    Binary(Vec<u8>),
}

impl Scalar {
    define_scalar_conversion_ops!();

    /// Return the string a mapping key holding this scalar is stored under.
    ///
    /// ```
    /// # use tessera_parser::Scalar;
    /// assert_eq!(Scalar::Null.to_key_string(), "null");
    /// assert_eq!(Scalar::Integer(-3).to_key_string(), "-3");
    /// assert_eq!(Scalar::FloatingPoint(f64::INFINITY.into()).to_key_string(), ".inf");
    /// assert_eq!(Scalar::String("foo".into()).to_key_string(), "foo");
    /// ```
    #[must_use]
    pub fn to_key_string(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Boolean(v) => v.to_string(),
            Self::Integer(v) => v.to_string(),
            Self::FloatingPoint(v) => format_float(v.into_inner()),
            Self::String(v) => v.clone(),
            Self::Binary(v) => String::from_utf8_lossy(v).into_owned(),
        }
    }
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        ".nan".to_owned()
    } else if v.is_infinite() {
        if v.is_sign_positive() { ".inf" } else { "-.inf" }.to_owned()
    } else {
        v.to_string()
    }
}

/// The node kinds of the YAML representation graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A scalar node.
    Scalar,
    /// A sequence node.
    Sequence,
    /// A mapping node.
    Mapping,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Kind::Scalar => "scalar",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        })
    }
}

/// The type contained in the [`Yaml::Sequence`] variant.
pub type Sequence = Vec<Rc<Node>>;
/// The type contained in the [`Yaml::Mapping`] variant.
///
/// Keys are the canonical string of the key node (see [`Node::to_key_string`]), in insertion
/// order. A key appearing twice keeps the last value.
pub type Mapping = LinkedHashMap<String, Rc<Node>>;

/// The content of a YAML node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Yaml {
    /// A scalar value.
    Value(Scalar),
    /// A YAML sequence.
    Sequence(Sequence),
    /// A YAML mapping.
    Mapping(Mapping),
}

impl Yaml {
    define_as_ref!(as_scalar, &Scalar, Value);
    define_as_ref!(as_sequence, &Sequence, Sequence);
    define_as_ref!(as_mapping, &Mapping, Mapping);

    define_into!(into_scalar, Scalar, Value);
    define_into!(into_sequence, Sequence, Sequence);
    define_into!(into_mapping, Mapping, Mapping);

    define_is!(is_scalar, Self::Value(_));
    define_is!(is_sequence, Self::Sequence(_));
    define_is!(is_mapping, Self::Mapping(_));

    /// Return the [`Kind`] of node this content belongs to.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Value(_) => Kind::Scalar,
            Self::Sequence(_) => Kind::Sequence,
            Self::Mapping(_) => Kind::Mapping,
        }
    }

    /// Return whether this is the null scalar.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Scalar::Null))
    }

    /// Return the string a mapping key holding this content is stored under.
    ///
    /// Collections are rendered in flow style: `[a, b]` and `{k: v}`.
    #[must_use]
    pub fn to_key_string(&self) -> String {
        let mut out = String::new();
        self.write_key_string(&mut out, usize::MAX);
        out
    }

    /// Return the key string of this content, or [`None`] if it is longer than `limit` bytes.
    ///
    /// Rendering stops as soon as the limit is crossed, so that collections sharing nodes through
    /// aliases are never expanded in full.
    ///
    /// ```
    /// # use tessera_parser::{Scalar, Yaml};
    /// let yaml = Yaml::Value(Scalar::String("abcdef".into()));
    /// assert_eq!(yaml.to_key_string_within(6).as_deref(), Some("abcdef"));
    /// assert_eq!(yaml.to_key_string_within(5), None);
    /// ```
    #[must_use]
    pub fn to_key_string_within(&self, limit: usize) -> Option<String> {
        let mut out = String::new();
        self.write_key_string(&mut out, limit).then_some(out)
    }

    /// Append the key string to `out`. Return `false` once `out` is longer than `limit`.
    fn write_key_string(&self, out: &mut String, limit: usize) -> bool {
        match self {
            Self::Value(scalar) => out.push_str(&scalar.to_key_string()),
            Self::Sequence(sequence) => {
                out.push('[');
                for (i, node) in sequence.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if !node.yaml.write_key_string(out, limit) {
                        return false;
                    }
                }
                out.push(']');
            }
            Self::Mapping(mapping) => {
                out.push('{');
                for (i, (key, node)) in mapping.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{key}: ");
                    if out.len() > limit || !node.yaml.write_key_string(out, limit) {
                        return false;
                    }
                }
                out.push('}');
            }
        }
        out.len() <= limit
    }
}

/// A composed YAML node: its content and the tag it was resolved with.
///
/// Nodes are immutable once composed. Aliases share the node of their anchor through the [`Rc`].
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use tessera_parser::{Node, Scalar, Yaml};
///
/// let node = Node::new(Some("tag:yaml.org,2002:int".into()), Yaml::Value(Scalar::Integer(3)));
/// assert_eq!(node.as_integer(), Some(3));
/// assert_eq!(node.tag(), Some("tag:yaml.org,2002:int"));
/// assert!(Node::null().is_null());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    /// The tag of the node.
    ///
    /// This is the resolved tag URI, `?` for plain scalars that were not resolved, `!` for nodes
    /// that opted out of resolution, or [`None`] for untagged non-plain nodes.
    pub tag: Option<String>,
    /// The content of the node.
    pub yaml: Yaml,
}

impl Node {
    /// Create a new node.
    #[must_use]
    pub fn new(tag: Option<String>, yaml: Yaml) -> Self {
        Self { tag, yaml }
    }

    /// Create a shared, untagged null node.
    #[must_use]
    pub fn null() -> Rc<Self> {
        Rc::new(Self::new(None, Yaml::Value(Scalar::Null)))
    }

    /// Return the tag of the node, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Return the [`Kind`] of the node.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.yaml.kind()
    }

    define_node_scalar_ops!(
        as_bool -> bool,
        as_integer -> i64,
        as_floating_point -> f64,
        as_str -> &str,
        as_binary -> &[u8],
    );

    define_node_scalar_is!(
        is_null,
        is_boolean,
        is_integer,
        is_floating_point,
        is_string,
        is_binary,
    );

    /// Return the scalar value of the node, if it is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        self.yaml.as_scalar()
    }

    /// Return the elements of the node, if it is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        self.yaml.as_sequence()
    }

    /// Return the entries of the node, if it is a mapping.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        self.yaml.as_mapping()
    }

    /// Return whether the node is a sequence.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.yaml.is_sequence()
    }

    /// Return whether the node is a mapping.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        self.yaml.is_mapping()
    }

    /// Return the value stored under `key` if the node is a mapping.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Rc<Node>> {
        self.as_mapping().and_then(|mapping| mapping.get(key))
    }

    /// Return the element at `index` if the node is a sequence.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Rc<Node>> {
        self.as_sequence().and_then(|sequence| sequence.get(index))
    }

    /// Return the string a mapping key holding this node is stored under.
    #[must_use]
    pub fn to_key_string(&self) -> String {
        self.yaml.to_key_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn string(v: &str) -> Rc<Node> {
        Rc::new(Node::new(None, Yaml::Value(Scalar::String(v.into()))))
    }

    #[test]
    fn key_strings() {
        let seq = Node::new(None, Yaml::Sequence(vec![string("a"), Node::null()]));
        assert_eq!(seq.to_key_string(), "[a, null]");

        let mut mapping = Mapping::new();
        mapping.insert("k".into(), Rc::new(seq));
        mapping.insert("f".into(), Rc::new(Node::new(None, Yaml::Value(Scalar::FloatingPoint(1.5.into())))));
        let map = Node::new(None, Yaml::Mapping(mapping));
        assert_eq!(map.to_key_string(), "{k: [a, null], f: 1.5}");
        assert_eq!(map.yaml.to_key_string_within(22).as_deref(), Some("{k: [a, null], f: 1.5}"));
        assert_eq!(map.yaml.to_key_string_within(21), None);
        assert_eq!(map.yaml.to_key_string_within(3), None);

        assert_eq!(Scalar::FloatingPoint(f64::NAN.into()).to_key_string(), ".nan");
        assert_eq!(Scalar::FloatingPoint(f64::NEG_INFINITY.into()).to_key_string(), "-.inf");
        assert_eq!(Scalar::FloatingPoint(2.0.into()).to_key_string(), "2");
        assert_eq!(Scalar::Boolean(false).to_key_string(), "false");
    }

    #[test]
    fn accessors() {
        let node = string("foo");
        assert_eq!(node.as_str(), Some("foo"));
        assert!(node.is_string());
        assert!(!node.is_null());
        assert_eq!(node.kind(), Kind::Scalar);
        assert_eq!(node.as_integer(), None);
        assert!(node.as_sequence().is_none());

        let seq = Node::new(None, Yaml::Sequence(vec![string("x")]));
        assert_eq!(seq.kind(), Kind::Sequence);
        assert_eq!(seq.get_index(0).and_then(|n| n.as_str()), Some("x"));
        assert!(seq.get_index(1).is_none());
        assert!(seq.get_key("x").is_none());
    }
}
