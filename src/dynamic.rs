//! Dynamically-typed input values as supplied by a host.
//!
//! A [`DynamicValue`] is what a host configuration language hands over when
//! a function parameter accepts "any type": scalars, ordered and unordered
//! collections, keyed mappings, values that are not yet known, and nested
//! wrappers whose concrete shape has to be unwrapped first.
//!
//! ## Building Inputs
//!
//! ```rust
//! use helm_values::{dynamic, DynamicValue};
//!
//! let input = dynamic!({
//!     "image": { "repository": "nginx", "tag": null },
//!     "ports": [80, 443],
//!     "hosts": set ["a.example.com", "b.example.com"],
//! });
//! assert_eq!(input.shape_name(), "map");
//! ```
//!
//! ## From JSON
//!
//! `DynamicValue` implements `Deserialize`, so any self-describing format can
//! produce one:
//!
//! ```rust
//! use helm_values::DynamicValue;
//!
//! let input: DynamicValue = serde_json::from_str(r#"{"replicas": 2, "debug": null}"#).unwrap();
//! assert!(matches!(input, DynamicValue::Map(_)));
//! ```

use crate::Decimal;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Keyed entries of a [`DynamicValue::Map`], in host order.
pub type DynamicValueMap = IndexMap<String, DynamicValue>;

/// A host value of any runtime shape.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum DynamicValue {
    /// The explicit unset value.
    #[default]
    Null,
    /// A value the host has not resolved yet.
    Unknown,
    Bool(bool),
    String(String),
    Number(Decimal),
    /// An ordered sequence (list or tuple).
    List(Vec<DynamicValue>),
    /// An unordered collection, in the host's enumeration order.
    Set(Vec<DynamicValue>),
    /// A keyed mapping (map or object).
    Map(DynamicValueMap),
    /// A dynamically-typed wrapper around another value.
    Dynamic(Box<DynamicValue>),
}

impl DynamicValue {
    /// Wraps a value in one level of dynamic indirection.
    #[must_use]
    pub fn wrap(value: DynamicValue) -> Self {
        DynamicValue::Dynamic(Box::new(value))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, DynamicValue::Unknown)
    }

    /// Strips dynamic wrappers, giving up after `limit` levels.
    ///
    /// Returns `None` when the chain is longer than `limit`.
    #[must_use]
    pub fn unwrapped(&self, limit: usize) -> Option<&DynamicValue> {
        let mut current = self;
        for _ in 0..=limit {
            match current {
                DynamicValue::Dynamic(inner) => current = inner.as_ref(),
                concrete => return Some(concrete),
            }
        }
        None
    }

    /// Name of the runtime shape, as reported in errors.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Unknown => "unknown",
            DynamicValue::Bool(_) => "bool",
            DynamicValue::String(_) => "string",
            DynamicValue::Number(_) => "number",
            DynamicValue::List(_) => "list",
            DynamicValue::Set(_) => "set",
            DynamicValue::Map(_) => "map",
            DynamicValue::Dynamic(_) => "dynamic",
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        DynamicValue::Bool(value)
    }
}

impl From<i32> for DynamicValue {
    fn from(value: i32) -> Self {
        DynamicValue::Number(Decimal::from(value))
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        DynamicValue::Number(Decimal::from(value))
    }
}

impl From<u64> for DynamicValue {
    fn from(value: u64) -> Self {
        DynamicValue::Number(Decimal::from(value))
    }
}

impl From<Decimal> for DynamicValue {
    fn from(value: Decimal) -> Self {
        DynamicValue::Number(value)
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        DynamicValue::String(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::String(value.to_string())
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(value: Vec<DynamicValue>) -> Self {
        DynamicValue::List(value)
    }
}

impl From<IndexMap<String, DynamicValue>> for DynamicValue {
    fn from(value: IndexMap<String, DynamicValue>) -> Self {
        DynamicValue::Map(value)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DynamicValue::Null, Into::into)
    }
}

impl FromIterator<(String, DynamicValue)> for DynamicValue {
    fn from_iter<T: IntoIterator<Item = (String, DynamicValue)>>(iter: T) -> Self {
        DynamicValue::Map(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DynamicValueVisitor;

        impl<'de> Visitor<'de> for DynamicValueVisitor {
            type Value = DynamicValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any configuration value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(DynamicValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(DynamicValue::Number(Decimal::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(DynamicValue::Number(Decimal::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Decimal::try_from(value)
                    .map(DynamicValue::Number)
                    .map_err(E::custom)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(DynamicValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(DynamicValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(DynamicValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(DynamicValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(DynamicValue::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, DynamicValue>()? {
                    entries.insert(key, value);
                }
                Ok(DynamicValue::Map(entries))
            }
        }

        deserializer.deserialize_any(DynamicValueVisitor)
    }
}
