//! The YAML 1.1 collection types: `!!omap`, `!!pairs` and `!!set`.

use std::{collections::HashSet, rc::Rc};

use tessera_parser::{Kind, Mapping, Node, Scalar, Sequence, Yaml, YamlType};

use super::yaml_tag;

/// The `!!omap` type: a sequence of single-pair mappings, with unique keys.
#[must_use]
pub fn omap() -> YamlType {
    YamlType::new(yaml_tag!("omap"), Kind::Sequence, Some(resolve_omap))
}

/// The `!!pairs` type: a sequence of single-pair mappings, turned into `[key, value]` sequences.
#[must_use]
pub fn pairs() -> YamlType {
    YamlType::new(yaml_tag!("pairs"), Kind::Sequence, Some(resolve_pairs))
}

/// The `!!set` type: a mapping whose values are all null.
#[must_use]
pub fn set() -> YamlType {
    YamlType::new(yaml_tag!("set"), Kind::Mapping, Some(resolve_set))
}

/// Return the only pair of `node`, if it is a mapping with a single entry.
fn single_pair(node: &Node) -> Option<(&String, &Rc<Node>)> {
    let mapping = node.as_mapping()?;
    if mapping.len() != 1 {
        return None;
    }
    mapping.iter().next()
}

fn resolve_omap(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let sequence = match yaml {
        Yaml::Value(Scalar::Null) => return Some(Yaml::Sequence(Sequence::new())),
        Yaml::Sequence(sequence) => sequence,
        _ => return None,
    };
    let mut keys = HashSet::new();
    for node in sequence {
        let (key, _) = single_pair(node)?;
        if !keys.insert(key) {
            return None;
        }
    }
    Some(yaml.clone())
}

fn resolve_pairs(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let sequence = match yaml {
        Yaml::Value(Scalar::Null) => return Some(Yaml::Sequence(Sequence::new())),
        Yaml::Sequence(sequence) => sequence,
        _ => return None,
    };
    let pairs = sequence
        .iter()
        .map(|node| {
            let (key, value) = single_pair(node)?;
            let key = Rc::new(Node::new(None, Yaml::Value(Scalar::String(key.clone()))));
            Some(Rc::new(Node::new(
                None,
                Yaml::Sequence(vec![key, value.clone()]),
            )))
        })
        .collect::<Option<Sequence>>()?;
    Some(Yaml::Sequence(pairs))
}

fn resolve_set(yaml: &Yaml, _: bool) -> Option<Yaml> {
    match yaml {
        Yaml::Value(Scalar::Null) => Some(Yaml::Mapping(Mapping::new())),
        Yaml::Mapping(mapping) => mapping
            .values()
            .all(|value| value.is_null())
            .then(|| yaml.clone()),
        Yaml::Value(_) | Yaml::Sequence(_) => None,
    }
}
