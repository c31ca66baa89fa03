//! Serde bridge into host values.
//!
//! [`DynamicValueSerializer`] turns any `T: Serialize` into a
//! [`DynamicValue`], so ordinary Rust structs can be encoded without building
//! inputs by hand. Optional fields that are `None` become `Null` and are
//! pruned from the output like any other absent value.
//!
//! ```rust
//! use helm_values::{to_string, Result};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Image {
//!     repository: String,
//!     tag: Option<String>,
//!     #[serde(rename = "pullPolicy")]
//!     pull_policy: Option<String>,
//! }
//!
//! # fn main() -> Result<()> {
//! let image = Image {
//!     repository: "nginx".to_string(),
//!     tag: Some("1.25".to_string()),
//!     pull_policy: None,
//! };
//! assert_eq!(to_string(&image)?, "repository: nginx\ntag: \"1.25\"\n");
//! # Ok(())
//! # }
//! ```
//!
//! Shapes a host cannot express are rejected with
//! [`Error::UnsupportedShape`](crate::Error::UnsupportedShape): enum variants
//! carrying data, maps keyed by anything but strings, and non-finite floats.

use crate::path::Path;
use crate::{Decimal, DynamicValue, Error, Result};
use indexmap::IndexMap;
use serde::{ser, Serialize};

/// Converts a `T: Serialize` into a [`DynamicValue`].
///
/// # Errors
///
/// Fails with [`Error::UnsupportedShape`] for shapes that have no host
/// counterpart.
pub fn to_dynamic<T>(value: &T) -> Result<DynamicValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(DynamicValueSerializer)
}

/// A serde `Serializer` producing [`DynamicValue`]s.
pub struct DynamicValueSerializer;

pub struct SerializeVec {
    vec: Vec<DynamicValue>,
}

pub struct SerializeMap {
    map: IndexMap<String, DynamicValue>,
    current_key: Option<String>,
}

fn integer<T: Into<Decimal>>(v: T) -> Result<DynamicValue> {
    Ok(DynamicValue::Number(v.into()))
}

impl ser::Serializer for DynamicValueSerializer {
    type Ok = DynamicValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<DynamicValue, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<DynamicValue, Error>;

    fn serialize_bool(self, v: bool) -> Result<DynamicValue> {
        Ok(DynamicValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<DynamicValue> {
        integer(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<DynamicValue> {
        integer(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<DynamicValue> {
        integer(v)
    }

    fn serialize_i64(self, v: i64) -> Result<DynamicValue> {
        integer(v)
    }

    fn serialize_i128(self, v: i128) -> Result<DynamicValue> {
        Ok(DynamicValue::Number(Decimal::from(num_bigint::BigInt::from(v))))
    }

    fn serialize_u8(self, v: u8) -> Result<DynamicValue> {
        integer(u32::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<DynamicValue> {
        integer(u32::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<DynamicValue> {
        integer(v)
    }

    fn serialize_u64(self, v: u64) -> Result<DynamicValue> {
        integer(v)
    }

    fn serialize_u128(self, v: u128) -> Result<DynamicValue> {
        Ok(DynamicValue::Number(Decimal::from(num_bigint::BigInt::from(v))))
    }

    fn serialize_f32(self, v: f32) -> Result<DynamicValue> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<DynamicValue> {
        if !v.is_finite() {
            return Err(Error::unsupported_shape("non-finite float", Path::root()));
        }
        Decimal::try_from(v).map(DynamicValue::Number)
    }

    fn serialize_char(self, v: char) -> Result<DynamicValue> {
        Ok(DynamicValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<DynamicValue> {
        Ok(DynamicValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<DynamicValue> {
        let vec = v
            .iter()
            .map(|&b| DynamicValue::Number(Decimal::from(u32::from(b))))
            .collect();
        Ok(DynamicValue::List(vec))
    }

    fn serialize_none(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<DynamicValue> {
        Ok(DynamicValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<DynamicValue> {
        Ok(DynamicValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<DynamicValue>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_shape("newtype variant", Path::root()))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_shape("tuple variant", Path::root()))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_shape("struct variant", Path::root()))
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn with_capacity(capacity: usize) -> Self {
        SerializeMap {
            map: IndexMap::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::List(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<DynamicValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_dynamic(key)? {
            DynamicValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::unsupported_shape(
                &format!("{} map key", other.shape_name()),
                Path::root(),
            )),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = DynamicValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_dynamic(value)?);
        Ok(())
    }

    fn end(self) -> Result<DynamicValue> {
        Ok(DynamicValue::Map(self.map))
    }
}
