//! Normalization of host values into canonical values.
//!
//! The [`Normalizer`] walks a [`DynamicValue`] and produces a [`Value`] using
//! only the canonical shapes. It never emits an unresolved value: unknowns
//! either fail with [`Error::UnsupportedShape`] or, when the caller opts in,
//! become [`Value::Absent`] below the top level.
//!
//! | Input shape | Canonical value |
//! |-------------|-----------------|
//! | `Null` | `Absent` |
//! | `Bool`, `String` | same scalar |
//! | `Number` | `Integer`, else exact `Float`, else `Big` |
//! | `List` | `List`, order preserved |
//! | `Set` | `List`, host order or sorted per [`SetOrder`] |
//! | `Map` | `Mapping` |
//! | `Dynamic` | the unwrapped value |
//! | `Unknown` | error (or `Absent`, see [`EncodeOptions::unknown_as_absent`]) |
//!
//! ```rust
//! use helm_values::{dynamic, normalize, EncodeOptions, Value};
//!
//! let value = normalize(&dynamic!({ "a": [1, null] }), &EncodeOptions::default()).unwrap();
//! let list = value.as_mapping().and_then(|m| m.get("a")).and_then(|v| v.as_list()).unwrap();
//! assert_eq!(list, &vec![Value::from(1), Value::Absent]);
//! ```

use crate::path::{Path, PathSegment};
use crate::{DynamicValue, EncodeOptions, Error, Mapping, Number, Result, SetOrder, Value};

/// Converts host values into canonical values, tracking the current path
/// for diagnostics.
pub struct Normalizer<'o> {
    options: &'o EncodeOptions,
    path: Vec<PathSegment>,
}

impl<'o> Normalizer<'o> {
    pub fn new(options: &'o EncodeOptions) -> Self {
        Normalizer {
            options,
            path: Vec::new(),
        }
    }

    pub fn normalize(&mut self, input: &DynamicValue) -> Result<Value> {
        self.path.clear();
        self.visit(input, 0)
    }

    fn current_path(&self) -> Path {
        Path::from(self.path.as_slice())
    }

    fn visit(&mut self, input: &DynamicValue, depth: usize) -> Result<Value> {
        let mut current = input;
        let mut unwraps = 0usize;

        loop {
            match current {
                DynamicValue::Dynamic(inner) => {
                    unwraps += 1;
                    if unwraps > self.options.max_unwrap {
                        return Err(Error::too_deep(self.options.max_unwrap, self.current_path()));
                    }
                    current = inner.as_ref();
                }
                DynamicValue::Null => return Ok(Value::Absent),
                DynamicValue::Unknown => {
                    if depth > 0 && self.options.unknown_as_absent {
                        tracing::trace!(path = %self.current_path(), "treating unknown value as absent");
                        return Ok(Value::Absent);
                    }
                    return Err(Error::unsupported_shape(
                        current.shape_name(),
                        self.current_path(),
                    ));
                }
                DynamicValue::Bool(b) => return Ok(Value::Bool(*b)),
                DynamicValue::String(s) => return Ok(Value::String(s.clone())),
                DynamicValue::Number(d) => return Ok(Value::Number(Number::from_decimal(d))),
                DynamicValue::List(items) => {
                    return self.visit_sequence(items, depth).map(Value::List);
                }
                DynamicValue::Set(items) => {
                    let mut values = self.visit_sequence(items, depth)?;
                    if self.options.set_order == SetOrder::Sorted {
                        tracing::trace!(len = values.len(), "sorting set elements");
                        values.sort_by(Value::total_cmp);
                    }
                    return Ok(Value::List(values));
                }
                DynamicValue::Map(entries) => {
                    self.enter(depth)?;
                    let mut map = Mapping::with_capacity(entries.len());
                    for (key, value) in entries {
                        self.path.push(PathSegment::Key(key.clone()));
                        let value = self.visit(value, depth + 1)?;
                        self.path.pop();
                        map.insert(key.clone(), value);
                    }
                    return Ok(Value::Mapping(map));
                }
            }
        }
    }

    fn visit_sequence(&mut self, items: &[DynamicValue], depth: usize) -> Result<Vec<Value>> {
        self.enter(depth)?;
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            let value = self.visit(item, depth + 1)?;
            self.path.pop();
            values.push(value);
        }
        Ok(values)
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.options.max_depth {
            return Err(Error::too_deep(self.options.max_depth, self.current_path()));
        }
        Ok(())
    }
}

/// Normalizes `input` with a fresh [`Normalizer`].
pub fn normalize(input: &DynamicValue, options: &EncodeOptions) -> Result<Value> {
    Normalizer::new(options).normalize(input)
}
