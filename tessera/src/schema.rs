//! The schemas shipped with `tessera`.
//!
//! Each schema is built once, on first use, and lives for the rest of the program. To customize a
//! schema, clone it and add or remove types:
//!
//! ```
//! use tessera::{schema, Kind, YamlType};
//!
//! let schema = schema::core()
//!     .clone()
//!     .with_explicit(YamlType::new("!env", Kind::Scalar, None));
//! assert!(schema.explicit("!env").is_some());
//! ```

use std::sync::LazyLock;

use tessera_parser::Schema;

use crate::types::{
    binary::binary,
    boolean,
    collections::{omap, pairs, set},
    failsafe, float, int,
    merge::merge,
    null,
    timestamp::timestamp,
};

static FAILSAFE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_explicit(failsafe::str())
        .with_explicit(failsafe::seq())
        .with_explicit(failsafe::map())
});

static JSON: LazyLock<Schema> = LazyLock::new(|| {
    failsafe()
        .clone()
        .with_implicit(null::json())
        .with_implicit(boolean::json())
        .with_implicit(int::json())
        .with_implicit(float::json())
});

static CORE: LazyLock<Schema> = LazyLock::new(|| {
    failsafe()
        .clone()
        .with_implicit(null::core())
        .with_implicit(boolean::core())
        .with_implicit(int::core())
        .with_implicit(float::core())
});

static DEFAULT_SAFE: LazyLock<Schema> = LazyLock::new(|| {
    failsafe()
        .clone()
        .with_implicit(null::core())
        .with_implicit(boolean::core())
        .with_implicit(int::yaml11())
        .with_implicit(float::yaml11())
        .with_implicit(merge())
        .with_explicit(binary())
        .with_explicit(omap())
        .with_explicit(pairs())
        .with_explicit(set())
});

static DEFAULT_FULL: LazyLock<Schema> = LazyLock::new(|| {
    // Timestamps are tried before the merge key.
    default_safe()
        .clone()
        .without(tessera_parser::MERGE_TAG)
        .with_implicit(timestamp())
        .with_implicit(merge())
});

/// The [failsafe schema](https://yaml.org/spec/1.2.2/#101-failsafe-schema): `!!str`, `!!seq` and
/// `!!map`.
///
/// Plain scalars are left as strings.
#[must_use]
pub fn failsafe() -> &'static Schema {
    &FAILSAFE
}

/// The [JSON schema](https://yaml.org/spec/1.2.2/#102-json-schema).
#[must_use]
pub fn json() -> &'static Schema {
    &JSON
}

/// The [core schema](https://yaml.org/spec/1.2.2/#103-core-schema) of YAML 1.2.
#[must_use]
pub fn core() -> &'static Schema {
    &CORE
}

/// The schema used by the `safe_load*` functions.
///
/// On top of the failsafe types, it resolves plain scalars the YAML 1.1 way: `null`, booleans,
/// integers (binary, octal, hexadecimal, base 60, with `_` separators), floats and the `<<` merge
/// key. `!!binary`, `!!omap`, `!!pairs` and `!!set` are available as explicit tags.
#[must_use]
pub fn default_safe() -> &'static Schema {
    &DEFAULT_SAFE
}

/// The schema used by the `load*` functions: [`default_safe`] with timestamps.
#[must_use]
pub fn default_full() -> &'static Schema {
    &DEFAULT_FULL
}
