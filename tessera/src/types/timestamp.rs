//! The `!!timestamp` type.

use std::sync::LazyLock;

use regex::Regex;
use tessera_parser::{Kind, Scalar, Yaml, YamlType};

use super::{text, value, yaml_tag};

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid regex"));
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})",
        r"(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})(?:\.[0-9]*)?",
        r"(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?$",
    ))
    .expect("valid regex")
});

/// The `!!timestamp` type.
///
/// Timestamps are validated against the forms of the [YAML 1.1 timestamp
/// type](https://yaml.org/type/timestamp.html) and kept as their text.
#[must_use]
pub fn timestamp() -> YamlType {
    YamlType::new(yaml_tag!("timestamp"), Kind::Scalar, Some(resolve))
}

fn resolve(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let s = text(yaml)?;
    let captures = DATE.captures(s).or_else(|| DATE_TIME.captures(s))?;
    let field = |i: usize| captures.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let (month, day) = (field(2)?, field(3)?);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    if captures.len() > 4 {
        if let Some(hour) = field(4) {
            if hour > 23 || field(5)? > 59 || field(6)? > 60 {
                return None;
            }
        }
    }
    Some(value(Scalar::String(s.to_owned())))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::test::resolve;

    #[test]
    fn timestamps() {
        for s in [
            "2001-12-14",
            "2001-12-14t21:59:43.10-05:00",
            "2001-12-14 21:59:43.10 -5",
            "2001-12-15T02:59:43.1Z",
            "2001-12-15 2:59:43.10",
        ] {
            assert_eq!(resolve(&timestamp(), s), Some(Scalar::String(s.into())), "{s}");
        }
        for s in ["2001-13-14", "2001-1-1", "2001-12-14 25:00:00", "12:30:00"] {
            assert_eq!(resolve(&timestamp(), s), None, "{s}");
        }
    }
}
