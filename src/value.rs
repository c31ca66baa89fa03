//! Canonical in-memory values.
//!
//! This module provides [`Value`], the closed set of shapes every accepted
//! input is normalized into, and [`Number`], its numeric payload.
//!
//! ## Core Types
//!
//! - [`Value`]: absent, scalar (bool, number, string), list or mapping
//! - [`Number`]: a 64-bit integer, a 64-bit float, or an exact
//!   arbitrary-precision [`Decimal`] when neither holds the host value exactly
//!
//! ## Examples
//!
//! ```rust
//! use helm_values::{Mapping, Number, Value};
//!
//! let mut service = Mapping::new();
//! service.insert("type".to_string(), Value::from("ClusterIP"));
//! service.insert("port".to_string(), Value::from(80));
//! service.insert("nodePort".to_string(), Value::Absent);
//!
//! let value = Value::Mapping(service);
//! assert!(value.is_mapping());
//! assert_eq!(
//!     value.as_mapping().and_then(|m| m.get("port")),
//!     Some(&Value::Number(Number::Integer(80)))
//! );
//! ```

use crate::{Decimal, Mapping};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A canonical value tree.
///
/// `Bool`, `Number` and `String` are the scalar shapes. `Absent` is the
/// explicit unset state; it is distinct from `false`, zero, the empty string
/// and empty containers, and it is what pruning removes.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Absent,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Mapping(Mapping),
}

/// A numeric scalar.
///
/// Integral host numbers that fit in `i64` are always `Integer`, so they are
/// written without a decimal point. `Float` holds values `f64` represents
/// exactly; everything else keeps its exact decimal form in `Big`.
///
/// ```rust
/// use helm_values::{Decimal, Number};
///
/// let d: Decimal = "3".parse().unwrap();
/// assert_eq!(Number::from_decimal(&d), Number::Integer(3));
///
/// let d: Decimal = "2.5".parse().unwrap();
/// assert_eq!(Number::from_decimal(&d), Number::Float(2.5));
///
/// let d: Decimal = "0.1".parse().unwrap();
/// assert!(Number::from_decimal(&d).is_big());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Big(Decimal),
}

impl Number {
    /// Picks the narrowest exact representation: `i64`, then `f64`, then
    /// the decimal itself.
    #[must_use]
    pub fn from_decimal(decimal: &Decimal) -> Self {
        if let Some(i) = decimal.to_i64() {
            return Number::Integer(i);
        }
        if let Some(f) = decimal.to_f64_exact() {
            return Number::Float(f);
        }
        Number::Big(decimal.clone())
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_big(&self) -> bool {
        matches!(self, Number::Big(_))
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(_) | Number::Big(_) => None,
        }
    }

    /// Converts to `f64`, rounding big decimals to the nearest float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Big(d) => d.to_f64_lossy(),
        }
    }

    /// A total order over numbers, comparing by numeric value and breaking
    /// ties between different representations by their text.
    #[must_use]
    pub fn total_cmp(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.cmp(b),
            _ => self
                .as_f64()
                .total_cmp(&other.as_f64())
                .then_with(|| self.to_string().cmp(&other.to_string())),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
            Number::Big(d) => write!(f, "{}", d),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(i64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Returns `true` for booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Name of the shape, for diagnostics.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Value::Absent => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::List(_) => 4,
            Value::Mapping(_) => 5,
        }
    }

    /// A total order over canonical values, used to give unordered host
    /// collections a reproducible order.
    ///
    /// Shapes order as absent < bool < number < string < list < mapping;
    /// lists compare element-wise and mappings compare their entries in
    /// emitter key order.
    #[must_use]
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.total_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                let a = a.sorted_entries();
                let b = b.sorted_entries();
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    let ord = crate::map::key_order(ka, kb).then_with(|| va.total_cmp(vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Absent => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Number(Number::Big(d)) => serializer.serialize_str(&d.to_string()),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.sorted_entries() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(i64::from(value)))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_number_from_decimal() {
        assert_eq!(Number::from_decimal(&dec("80")), Number::Integer(80));
        assert_eq!(Number::from_decimal(&dec("80.0")), Number::Integer(80));
        assert_eq!(Number::from_decimal(&dec("-0.75")), Number::Float(-0.75));
        assert_eq!(
            Number::from_decimal(&dec("18446744073709551616")),
            Number::Float(18446744073709551616.0)
        );
        assert_eq!(
            Number::from_decimal(&dec("3.14159")),
            Number::Big(dec("3.14159"))
        );
    }

    #[test]
    fn test_scalar_predicates() {
        assert!(Value::from(true).is_scalar());
        assert!(Value::from("x").is_scalar());
        assert!(Value::from(1).is_scalar());
        assert!(!Value::Absent.is_scalar());
        assert!(!Value::List(vec![]).is_scalar());
        assert!(Value::Absent.is_absent());
        assert_eq!(Value::default(), Value::Absent);
    }

    #[test]
    fn test_total_cmp_orders_shapes_then_contents() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2),
            Value::List(vec![Value::from(1)]),
            Value::from(false),
            Value::from("a"),
            Value::Number(Number::Float(1.5)),
        ];
        values.sort_by(Value::total_cmp);
        assert_eq!(
            values,
            vec![
                Value::from(false),
                Value::Number(Number::Float(1.5)),
                Value::from(2),
                Value::from("a"),
                Value::from("b"),
                Value::List(vec![Value::from(1)]),
            ]
        );
    }

    #[test]
    fn test_number_total_cmp_mixed_representations() {
        let big = Number::Big(dec("0.1"));
        assert_eq!(big.total_cmp(&Number::Float(0.5)), Ordering::Less);
        assert_eq!(Number::Integer(1).total_cmp(&big), Ordering::Greater);
        assert_eq!(big.total_cmp(&big.clone()), Ordering::Equal);
    }

    #[test]
    fn test_serialize_sorts_mapping_keys() {
        let map: Mapping = vec![
            ("b".to_string(), Value::from(1)),
            ("a".to_string(), Value::from("x")),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&Value::Mapping(map)).unwrap();
        assert_eq!(json, r#"{"a":"x","b":1}"#);
    }
}
