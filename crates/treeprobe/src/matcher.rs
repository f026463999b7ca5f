//! Type-aware value equality and the key/value match predicate.
//!
//! Equality is directional: the first operand is the expected side (taken
//! from a requirement) and the second is the value found in the tree. The
//! rules are strict about types: numbers of different widths never compare
//! equal, even when they hold the same magnitude.
//!
//! # Rules by expected variant
//!
//! | Expected            | Equal when                                                |
//! |---------------------|-----------------------------------------------------------|
//! | `Null`              | actual is `Null`                                          |
//! | scalar              | actual is the same variant with the same value            |
//! | `String`            | same string, or same after lowercasing when insensitive   |
//! | `Sequence`          | same length and elements pair up one-to-one, any order    |
//! | `Mapping`           | same key set, every value recursively equal               |

use crate::value::{Mapping, Value};
use serde::{Deserialize, Serialize};

/// How strings (keys and string values) are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// Compare two strings under this mode.
    pub fn str_eq(self, a: &str, b: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a == b || a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Compare an expected value against an actual one.
///
/// # Examples
///
/// ```
/// use treeprobe::{equals, CaseSensitivity, Value};
///
/// let expected = Value::from(vec![4i64, 3, 2, 1]);
/// let actual = Value::from(vec![1i64, 2, 4, 3]);
/// assert!(equals(&expected, &actual, CaseSensitivity::Sensitive));
///
/// // Widths are never coerced.
/// assert!(!equals(&Value::Int32(7), &Value::Int64(7), CaseSensitivity::Sensitive));
/// ```
pub fn equals(expected: &Value, actual: &Value, case: CaseSensitivity) -> bool {
    match expected {
        Value::Null => actual.is_null(),
        Value::Bool(a) => matches!(actual, Value::Bool(b) if a == b),
        Value::Int8(a) => matches!(actual, Value::Int8(b) if a == b),
        Value::Int16(a) => matches!(actual, Value::Int16(b) if a == b),
        Value::Int32(a) => matches!(actual, Value::Int32(b) if a == b),
        Value::Int64(a) => matches!(actual, Value::Int64(b) if a == b),
        Value::Float32(a) => matches!(actual, Value::Float32(b) if a == b),
        Value::Float64(a) => matches!(actual, Value::Float64(b) if a == b),
        Value::String(a) => matches!(actual, Value::String(b) if case.str_eq(a, b)),
        Value::Sequence(a) => match actual {
            Value::Sequence(b) => sequence_equals(a, b, case),
            _ => false,
        },
        Value::Mapping(a) => match actual {
            Value::Mapping(b) => mapping_equals(a, b, case),
            _ => false,
        },
    }
}

/// Unordered sequence equality: equal length and a one-to-one pairing of
/// elements under [`equals`].
///
/// Each actual element may be claimed once, so `[true, true, false]` does
/// not equal `[true, false, false]`. Greedy pairing is exact here because
/// `equals` partitions values into equivalence classes.
fn sequence_equals(expected: &[Value], actual: &[Value], case: CaseSensitivity) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    let mut claimed = vec![false; actual.len()];
    for want in expected {
        let slot = (0..actual.len()).find(|&i| !claimed[i] && equals(want, &actual[i], case));
        match slot {
            Some(i) => claimed[i] = true,
            None => return false,
        }
    }
    true
}

/// Full nested mapping equality. Keys always compare exactly; the case mode
/// applies to the values only.
fn mapping_equals(expected: &Mapping, actual: &Mapping, case: CaseSensitivity) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .all(|(k, want)| actual.get(k).is_some_and(|have| equals(want, have, case)))
}

/// The atomic predicate applied at every visited node.
///
/// - Empty `req_key`: a value-only probe, satisfied when the values are equal.
/// - Non-empty `req_key` and no `req_value`: a key-only probe, satisfied when
///   the node carries a matching key.
/// - Both: the key must match and the values must be equal.
pub fn matches(
    node_key: Option<&str>,
    req_key: &str,
    node_value: &Value,
    req_value: Option<&Value>,
    case: CaseSensitivity,
) -> bool {
    if req_key.is_empty() {
        return req_value.is_some_and(|want| equals(want, node_value, case));
    }
    let key_matches = node_key.is_some_and(|key| case.str_eq(key, req_key));
    key_matches && req_value.is_none_or(|want| equals(want, node_value, case))
}
