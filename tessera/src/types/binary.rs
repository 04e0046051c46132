//! The `!!binary` type: base64 encoded bytes.

use base64::{engine::general_purpose::STANDARD, Engine};
use tessera_parser::{Kind, Scalar, Yaml, YamlType};

use super::{text, value, yaml_tag};

/// The `!!binary` type.
///
/// Whitespace within the text is ignored, so that the data can span several lines.
#[must_use]
pub fn binary() -> YamlType {
    YamlType::new(yaml_tag!("binary"), Kind::Scalar, Some(resolve))
}

fn resolve(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let encoded: String = text(yaml)?
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(encoded).ok()?;
    Some(value(Scalar::Binary(bytes)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::test::resolve;

    #[test]
    fn base64() {
        assert_eq!(
            resolve(&binary(), "aGVs\nbG8="),
            Some(Scalar::Binary(b"hello".to_vec()))
        );
        assert_eq!(resolve(&binary(), ""), Some(Scalar::Binary(vec![])));
        assert_eq!(resolve(&binary(), "aGVsbG8"), None);
        assert_eq!(resolve(&binary(), "not base64!"), None);
    }
}
