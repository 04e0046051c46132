//! The `!!merge` type: the `<<` key splicing mappings into the one it belongs to.

use tessera_parser::{Kind, Scalar, Yaml, YamlType, MERGE_TAG};

/// The `!!merge` type.
///
/// The merge itself is done by the loader when it stores a key tagged with [`MERGE_TAG`].
#[must_use]
pub fn merge() -> YamlType {
    YamlType::new(MERGE_TAG, Kind::Scalar, Some(resolve))
}

fn resolve(yaml: &Yaml, _: bool) -> Option<Yaml> {
    match yaml {
        Yaml::Value(Scalar::Null) => Some(yaml.clone()),
        Yaml::Value(Scalar::String(s)) if s == "<<" => Some(yaml.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::test::resolve;

    #[test]
    fn merge_key() {
        assert_eq!(resolve(&merge(), "<<"), Some(Scalar::String("<<".into())));
        assert_eq!(resolve(&merge(), "<"), None);
    }
}
