//! Internal helpers for generating code.

/// Generate the conversion methods of [`Scalar`].
///
/// [`Node`] forwards to them through [`define_node_scalar_ops`] and [`define_node_scalar_is`].
///
/// [`Scalar`]: crate::Scalar
/// [`Node`]: crate::Node
macro_rules! define_scalar_conversion_ops (
    () => (
define_as!(as_bool,           bool, Boolean);
define_as!(as_integer,        i64,  Integer);

define_as_pattern!(as_floating_point, f64 => Self::FloatingPoint(v) => Some(v.into_inner()));

define_as_ref!(as_str,        &str,  String);
define_as_ref!(as_binary,     &[u8], Binary);

define_into!(into_string,     String,  String);
define_into!(into_binary,     Vec<u8>, Binary);

define_is!(is_null,           Self::Null);
define_is!(is_boolean,        Self::Boolean(_));
define_is!(is_integer,        Self::Integer(_));
define_is!(is_floating_point, Self::FloatingPoint(_));
define_is!(is_string,         Self::String(_));
define_is!(is_binary,         Self::Binary(_));
    );
);

/// Generate the scalar accessors of [`Node`] by forwarding them to its [`Scalar`] value.
///
/// [`Scalar`]: crate::Scalar
/// [`Node`]: crate::Node
macro_rules! define_node_scalar_ops (
    ($($fn_name:ident -> $t:ty),+ $(,)?) => (
$(
/// Forward to the [`Scalar`] method of the same name if the node is a scalar.
///
/// # Return
/// Returns [`None`] if the node is a collection or holds another kind of scalar.
///
/// [`Scalar`]: crate::Scalar
#[must_use]
pub fn $fn_name(&self) -> Option<$t> {
    match &self.yaml {
        Yaml::Value(scalar) => scalar.$fn_name(),
        _ => None,
    }
}
)+
    );
);

/// Generate `is_TYPE` methods of [`Node`] by forwarding them to its [`Scalar`] value.
///
/// [`Scalar`]: crate::Scalar
/// [`Node`]: crate::Node
macro_rules! define_node_scalar_is (
    ($($fn_name:ident),+ $(,)?) => (
$(
/// Forward to the [`Scalar`] method of the same name if the node is a scalar.
///
/// # Return
/// Returns `false` if the node is a collection.
///
/// [`Scalar`]: crate::Scalar
#[must_use]
pub fn $fn_name(&self) -> bool {
    matches!(&self.yaml, Yaml::Value(scalar) if scalar.$fn_name())
}
)+
    );
);

// ================================== HIGH-LEVEL DEFINE MACROS ==================================

/// Generate `as_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]).
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_as (
    ($fn_name:ident, $t:ident, $variant:ident) => (
define_as_pattern!($fn_name, $t => Self::$variant(v) => Some(v));
    );
);

/// Generate `as_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]), returning references.
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_as_ref (
    ($fn_name:ident, $t:ty, $variant:ident) => (
define_as_ref_pattern!($fn_name, $t => Self::$variant(ref v) => Some(v));
    );
);

/// Generate `into_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]).
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_into (
    ($fn_name:ident, $t:ty, $variant:ident) => (
define_into_pattern!($fn_name, $t => Self::$variant(v) => Some(v));
    );
);

/// Generate `is_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]).
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_is (
    ($fn_name:ident, $variant:pat) => (
/// Check whether the YAML enum contains the given variant.
///
/// # Return
/// If the variant of `self` is `Self::$variant`, return `true`. Otherwise, return `false`.
#[must_use]
pub fn $fn_name(&self) -> bool {
    matches!(self, $variant)
}
    );
);

// ================================== LOW-LEVEL DEFINE MACROS ==================================

/// Generate `as_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]).
///
/// Takes a match arm expression as parameter and pastes it in the `match`.
/// If matching a variant of `self`, use [`define_as`].
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_as_pattern (
    ($fn_name:ident, $t:ty => $($variant:tt)+ ) => (
/// Get a copy of the inner object in the YAML enum if it is a `$t`.
///
/// # Return
/// If the variant of `self` is `Self::$variant`, return `Some($t)` with a copy of the `$t` contained.
/// Otherwise, return `None`.
#[must_use]
pub fn $fn_name(&self) -> Option<$t> {
    match *self {
        $($variant)+,
        _ => None
    }
}
    );
);

/// Generate `as_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]), returning references.
///
/// Takes a match arm expression as parameter and pastes it in the `match`.
/// If matching a variant of `self`, use [`define_as_ref`].
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_as_ref_pattern (
    ($fn_name:ident, $t:ty => $($variant:tt)+) => (
/// Get a reference to the inner object in the YAML enum if it is a `$t`.
///
/// # Return
/// If the variant of `self` is `Self::$variant`, return `Some(&$t)` with the `$t` contained. Otherwise,
/// return `None`.
#[must_use]
pub fn $fn_name(&self) -> Option<$t> {
    match self {
        $($variant)+,
        _ => None
    }
}
    );
);

/// Generate `into_TYPE` methods for YAML objects ([`Scalar`], [`Yaml`]).
///
/// [`Scalar`]: crate::Scalar
/// [`Yaml`]: crate::Yaml
macro_rules! define_into_pattern (
    ($fn_name:ident, $t:ty => $($variant:tt)+) => (
/// Get the inner object in the YAML enum if it is a `$t`.
///
/// # Return
/// If the variant of `self` is `Self::$variant`, return `Some($t)` with the `$t` contained. Otherwise,
/// return `None`.
#[must_use]
pub fn $fn_name(self) -> Option<$t> {
    match self {
        $($variant)+,
        _ => None
    }
}
    );
);
