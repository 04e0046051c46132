//! The types of the [failsafe schema](https://yaml.org/spec/1.2.2/#101-failsafe-schema).
//!
//! These only ever apply to explicitly tagged nodes. Their resolvers turn an empty node into an
//! empty value of their kind.

use tessera_parser::{Kind, Mapping, Scalar, Sequence, Yaml, YamlType};

use super::{text, value, yaml_tag};

/// The `!!str` type.
#[must_use]
pub fn str() -> YamlType {
    YamlType::new(yaml_tag!("str"), Kind::Scalar, Some(resolve_str))
}

/// The `!!seq` type.
#[must_use]
pub fn seq() -> YamlType {
    YamlType::new(yaml_tag!("seq"), Kind::Sequence, Some(resolve_seq))
}

/// The `!!map` type.
#[must_use]
pub fn map() -> YamlType {
    YamlType::new(yaml_tag!("map"), Kind::Mapping, Some(resolve_map))
}

fn resolve_str(yaml: &Yaml, _: bool) -> Option<Yaml> {
    text(yaml).map(|s| value(Scalar::String(s.to_owned())))
}

fn resolve_seq(yaml: &Yaml, _: bool) -> Option<Yaml> {
    match yaml {
        Yaml::Sequence(_) => Some(yaml.clone()),
        Yaml::Value(Scalar::Null) => Some(Yaml::Sequence(Sequence::new())),
        Yaml::Value(_) | Yaml::Mapping(_) => None,
    }
}

fn resolve_map(yaml: &Yaml, _: bool) -> Option<Yaml> {
    match yaml {
        Yaml::Mapping(_) => Some(yaml.clone()),
        Yaml::Value(Scalar::Null) => Some(Yaml::Mapping(Mapping::new())),
        Yaml::Value(_) | Yaml::Sequence(_) => None,
    }
}
