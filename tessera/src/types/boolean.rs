//! The `!!bool` type.

use tessera_parser::{Kind, Scalar, Yaml, YamlType};

use super::{text, value, yaml_tag};

/// The `!!bool` type of the JSON schema: `true` and `false`.
#[must_use]
pub fn json() -> YamlType {
    YamlType::new(yaml_tag!("bool"), Kind::Scalar, Some(resolve_json))
}

/// The `!!bool` type of the core schema: `true` and `false`, lowercase, capitalized or uppercase.
#[must_use]
pub fn core() -> YamlType {
    YamlType::new(yaml_tag!("bool"), Kind::Scalar, Some(resolve_core))
}

fn resolve_json(yaml: &Yaml, _: bool) -> Option<Yaml> {
    match text(yaml)? {
        "true" => Some(value(Scalar::Boolean(true))),
        "false" => Some(value(Scalar::Boolean(false))),
        _ => None,
    }
}

fn resolve_core(yaml: &Yaml, _: bool) -> Option<Yaml> {
    match text(yaml)? {
        "true" | "True" | "TRUE" => Some(value(Scalar::Boolean(true))),
        "false" | "False" | "FALSE" => Some(value(Scalar::Boolean(false))),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::test::resolve;

    #[test]
    fn boolean_forms() {
        assert_eq!(resolve(&core(), "True"), Some(Scalar::Boolean(true)));
        assert_eq!(resolve(&core(), "FALSE"), Some(Scalar::Boolean(false)));
        assert_eq!(resolve(&core(), "yes"), None);
        assert_eq!(resolve(&core(), "tRUE"), None);
        assert_eq!(resolve(&json(), "true"), Some(Scalar::Boolean(true)));
        assert_eq!(resolve(&json(), "True"), None);
    }
}
