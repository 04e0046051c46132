//! The `!!int` type.
//!
//! Integers are 64-bit signed. Text that matches an integer pattern but overflows is not an
//! integer.

use std::sync::LazyLock;

use regex::Regex;
use tessera_parser::{Kind, Scalar, Yaml, YamlType};

use super::{text, value, yaml_tag};

static JSON_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0|[1-9][0-9]*)$").expect("valid regex"));
static CORE_INT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$").expect("valid regex")
});
/// The trailing `:`-separated groups of a base 60 integer.
static SEXAGESIMAL_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?::[0-5]?[0-9])+$").expect("valid regex"));

/// The `!!int` type of the JSON schema.
#[must_use]
pub fn json() -> YamlType {
    YamlType::new(yaml_tag!("int"), Kind::Scalar, Some(resolve_json))
}

/// The `!!int` type of the core schema: decimal, `0o` octal and `0x` hexadecimal.
#[must_use]
pub fn core() -> YamlType {
    YamlType::new(yaml_tag!("int"), Kind::Scalar, Some(resolve_core))
}

/// The `!!int` type of YAML 1.1.
///
/// On top of signed decimals, it accepts `0b` binary, `0`-prefixed octal, `0x` hexadecimal and
/// base 60 (`1:30`) integers. Digits may be separated by `_`.
#[must_use]
pub fn yaml11() -> YamlType {
    YamlType::new(yaml_tag!("int"), Kind::Scalar, Some(resolve_yaml11))
}

fn resolve_json(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let s = text(yaml)?;
    if !JSON_INT.is_match(s) {
        return None;
    }
    s.parse().ok().map(|v| value(Scalar::Integer(v)))
}

fn resolve_core(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let s = text(yaml)?;
    if !CORE_INT.is_match(s) {
        return None;
    }
    let v = if let Some(digits) = s.strip_prefix("0o") {
        i64::from_str_radix(digits, 8).ok()?
    } else if let Some(digits) = s.strip_prefix("0x") {
        i64::from_str_radix(digits, 16).ok()?
    } else {
        s.parse().ok()?
    };
    Some(value(Scalar::Integer(v)))
}

fn resolve_yaml11(yaml: &Yaml, _: bool) -> Option<Yaml> {
    parse_yaml11(text(yaml)?).map(|v| value(Scalar::Integer(v)))
}

/// Parse a YAML 1.1 integer.
fn parse_yaml11(s: &str) -> Option<i64> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = if body == "0" {
        0
    } else if let Some(digits) = body.strip_prefix("0b") {
        parse_radix(digits, 2)?
    } else if let Some(digits) = body.strip_prefix("0x") {
        parse_radix(digits, 16)?
    } else if let Some(digits) = body.strip_prefix('0') {
        parse_radix(digits, 8)?
    } else {
        parse_decimal(body)?
    };

    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Parse `_`-separated digits of the given radix. There must be at least one digit, and the last
/// character may not be a `_`.
fn parse_radix(digits: &str, radix: u32) -> Option<i128> {
    if digits.ends_with('_') || !digits.chars().all(|c| c == '_' || c.is_digit(radix)) {
        return None;
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return None;
    }
    i128::from_str_radix(&digits, radix).ok()
}

/// Parse a decimal or base 60 integer.
fn parse_decimal(body: &str) -> Option<i128> {
    if body.starts_with('_') {
        return None;
    }
    let (head, tail) = match body.find(':') {
        Some(colon) => body.split_at(colon),
        None => (body, ""),
    };
    if !tail.is_empty() && !SEXAGESIMAL_TAIL.is_match(tail) {
        return None;
    }

    let mut v = parse_radix(head, 10)?;
    for group in tail.split(':').skip(1) {
        v = v.checked_mul(60)?.checked_add(group.parse::<i128>().ok()?)?;
    }
    Some(v)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::test::resolve;

    #[test]
    fn json_integers() {
        assert_eq!(resolve(&json(), "-12"), Some(Scalar::Integer(-12)));
        assert_eq!(resolve(&json(), "012"), None);
        assert_eq!(resolve(&json(), "+12"), None);
        assert_eq!(resolve(&json(), "0x12"), None);
    }

    #[test]
    fn core_integers() {
        assert_eq!(resolve(&core(), "+12"), Some(Scalar::Integer(12)));
        assert_eq!(resolve(&core(), "012"), Some(Scalar::Integer(12)));
        assert_eq!(resolve(&core(), "0o17"), Some(Scalar::Integer(15)));
        assert_eq!(resolve(&core(), "0xFf"), Some(Scalar::Integer(255)));
        assert_eq!(resolve(&core(), "1_000"), None);
        assert_eq!(resolve(&core(), "99999999999999999999"), None);
    }

    #[test]
    fn yaml11_integers() {
        assert_eq!(parse_yaml11("0"), Some(0));
        assert_eq!(parse_yaml11("-0"), Some(0));
        assert_eq!(parse_yaml11("1_000"), Some(1000));
        assert_eq!(parse_yaml11("0b1010"), Some(10));
        assert_eq!(parse_yaml11("-0b_1010"), Some(-10));
        assert_eq!(parse_yaml11("017"), Some(15));
        assert_eq!(parse_yaml11("0x_1F"), Some(31));
        assert_eq!(parse_yaml11("190:20:30"), Some(685_230));
        assert_eq!(parse_yaml11("-1:30"), Some(-90));
        assert_eq!(parse_yaml11("-9223372036854775808"), Some(i64::MIN));

        for s in [
            "", "-", "_1", "1_", "0b", "0b2", "09", "0x", "1:60", "1:", "1:2:", "12a", "+-1",
        ] {
            assert_eq!(parse_yaml11(s), None, "{s:?}");
        }
    }
}
