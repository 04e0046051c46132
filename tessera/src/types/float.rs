//! The `!!float` type.

use std::sync::LazyLock;

use regex::Regex;
use tessera_parser::{Kind, Scalar, Yaml, YamlType};

use super::{text, value, yaml_tag};

static JSON_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?$").expect("valid regex")
});
static CORE_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?",
        r"|[-+]?\.(?:inf|Inf|INF)",
        r"|\.(?:nan|NaN|NAN))$",
    ))
    .expect("valid regex")
});
static YAML11_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:[-+]?(?:0|[1-9][0-9_]*)(?:\.[0-9_]*)?(?:[eE][-+]?[0-9]+)?",
        r"|\.[0-9_]+(?:[eE][-+]?[0-9]+)?",
        r"|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*",
        r"|[-+]?\.(?:inf|Inf|INF)",
        r"|\.(?:nan|NaN|NAN))$",
    ))
    .expect("valid regex")
});

/// The `!!float` type of the JSON schema.
#[must_use]
pub fn json() -> YamlType {
    YamlType::new(yaml_tag!("float"), Kind::Scalar, Some(resolve_json))
}

/// The `!!float` type of the core schema.
#[must_use]
pub fn core() -> YamlType {
    YamlType::new(yaml_tag!("float"), Kind::Scalar, Some(resolve_core))
}

/// The `!!float` type of YAML 1.1, allowing `_` separators and base 60 (`1:30.5`) notation.
#[must_use]
pub fn yaml11() -> YamlType {
    YamlType::new(yaml_tag!("float"), Kind::Scalar, Some(resolve_yaml11))
}

fn float(v: f64) -> Yaml {
    value(Scalar::FloatingPoint(v.into()))
}

fn resolve_json(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let s = text(yaml)?;
    if !JSON_FLOAT.is_match(s) {
        return None;
    }
    s.parse().ok().map(float)
}

fn resolve_core(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let s = text(yaml)?;
    if !CORE_FLOAT.is_match(s) {
        return None;
    }
    parse_core_schema_fp(s).map(float)
}

fn resolve_yaml11(yaml: &Yaml, _: bool) -> Option<Yaml> {
    let s = text(yaml)?;
    if !YAML11_FLOAT.is_match(s) || s.ends_with('_') {
        return None;
    }

    let s = s.replace('_', "").to_lowercase();
    let (sign, body) = match s.as_bytes().first()? {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s.as_str()),
    };
    let v = match body {
        ".inf" => f64::INFINITY,
        ".nan" => f64::NAN,
        _ if body.contains(':') => {
            let mut v = 0.0;
            for group in body.split(':') {
                v = v * 60.0 + group.parse::<f64>().ok()?;
            }
            v
        }
        _ => body.parse().ok()?,
    };
    Some(float(sign * v))
}

/// Parse the given string as a floating point according to the core schema.
///
/// See [10.2.1.4](https://yaml.org/spec/1.2.2/#10214-floating-point) for the floating point
/// definition.
///
/// # Return
/// Returns `Some` if parsing succeeding, `None` otherwise.
fn parse_core_schema_fp(v: &str) -> Option<f64> {
    match v {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        // Test that `v` contains a digit so as not to pass in strings like `inf`,
        // which rust will parse as a float.
        _ if v.as_bytes().iter().any(u8::is_ascii_digit) => v.parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::test::resolve;

    fn resolve_f64(ty: &YamlType, s: &str) -> Option<f64> {
        resolve(ty, s)?.as_floating_point()
    }

    #[test]
    fn json_floats() {
        assert_eq!(resolve_f64(&json(), "-1.5e3"), Some(-1500.0));
        assert_eq!(resolve_f64(&json(), "1"), Some(1.0));
        assert_eq!(resolve_f64(&json(), ".5"), None);
        assert_eq!(resolve_f64(&json(), ".inf"), None);
    }

    #[test]
    fn core_floats() {
        assert_eq!(resolve_f64(&core(), ".5"), Some(0.5));
        assert_eq!(resolve_f64(&core(), "+1."), Some(1.0));
        assert_eq!(resolve_f64(&core(), "-.INF"), Some(f64::NEG_INFINITY));
        assert!(resolve_f64(&core(), ".NaN").is_some_and(f64::is_nan));
        assert_eq!(resolve_f64(&core(), "inf"), None);
        assert_eq!(resolve_f64(&core(), "1_0.5"), None);
    }

    #[test]
    fn yaml11_floats() {
        assert_eq!(resolve_f64(&yaml11(), "1_000.5"), Some(1000.5));
        assert_eq!(resolve_f64(&yaml11(), "6.8523015e+5"), Some(685_230.15));
        assert_eq!(resolve_f64(&yaml11(), "1:30.5"), Some(90.5));
        assert_eq!(resolve_f64(&yaml11(), "-1:01:30.25"), Some(-3690.25));
        assert_eq!(resolve_f64(&yaml11(), "-.inf"), Some(f64::NEG_INFINITY));
        assert_eq!(resolve_f64(&yaml11(), ".5"), Some(0.5));
        assert_eq!(resolve_f64(&yaml11(), "1_000.5_"), None);
        assert_eq!(resolve_f64(&yaml11(), "1e5"), Some(100_000.0));
        assert_eq!(resolve_f64(&yaml11(), "-.5"), None);
        assert_eq!(resolve_f64(&yaml11(), "01.5"), None);
    }
}
