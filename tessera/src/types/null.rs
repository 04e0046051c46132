//! The `!!null` type.

use tessera_parser::{Kind, Scalar, Yaml, YamlType};

use super::{text, value, yaml_tag};

/// The `!!null` type of the JSON schema: only `null`, or nothing.
#[must_use]
pub fn json() -> YamlType {
    YamlType::new(yaml_tag!("null"), Kind::Scalar, Some(resolve_json))
}

/// The `!!null` type of the core schema: `~`, `null` in three cases, or nothing.
#[must_use]
pub fn core() -> YamlType {
    YamlType::new(yaml_tag!("null"), Kind::Scalar, Some(resolve_core))
}

fn resolve_json(yaml: &Yaml, _: bool) -> Option<Yaml> {
    matches!(text(yaml)?, "" | "null").then(|| value(Scalar::Null))
}

fn resolve_core(yaml: &Yaml, _: bool) -> Option<Yaml> {
    matches!(text(yaml)?, "" | "~" | "null" | "Null" | "NULL").then(|| value(Scalar::Null))
}
