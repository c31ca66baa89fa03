//! # helm_values
//!
//! Encode dynamically-typed configuration values as YAML, the way chart
//! values files expect them: every null is dropped, and so is every list or
//! mapping that ends up empty because of it.
//!
//! ## How It Works
//!
//! Encoding is a pipeline of three pure stages:
//!
//! 1. **Normalize**: a host [`DynamicValue`] (scalars, lists, sets, maps,
//!    unresolved values, dynamic wrappers) becomes a canonical [`Value`]
//! 2. **Prune**: [`prune`] removes [`Value::Absent`] nodes bottom-up, along
//!    with containers left empty
//! 3. **Emit**: the surviving tree is written as block-style YAML with
//!    sorted keys, or as `""` when nothing survives
//!
//! ## Quick Start
//!
//! ```rust
//! use helm_values::{dynamic, encode};
//!
//! let values = dynamic!({
//!     "replicaCount": 2,
//!     "image": { "repository": "nginx", "tag": null },
//!     "nodeSelector": { "disktype": null },
//!     "tolerations": [null, null],
//! });
//!
//! let yaml = encode(&values).unwrap();
//! assert_eq!(yaml, "image:\n  repository: nginx\nreplicaCount: 2\n");
//! ```
//!
//! ### From Rust Types
//!
//! Anything implementing `Serialize` can be encoded directly; `None` fields
//! are pruned like nulls.
//!
//! ```rust
//! use helm_values::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Service {
//!     #[serde(rename = "type")]
//!     kind: String,
//!     port: u16,
//!     #[serde(rename = "nodePort")]
//!     node_port: Option<u16>,
//! }
//!
//! let service = Service { kind: "ClusterIP".to_string(), port: 80, node_port: None };
//! assert_eq!(to_string(&service).unwrap(), "port: 80\ntype: ClusterIP\n");
//! ```
//!
//! ## Errors
//!
//! Encoding is all-or-nothing. Unresolved values and containers nested past
//! [`EncodeOptions::max_depth`] fail with an [`Error`] carrying the [`Path`]
//! of the offending value.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level and never
//! installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding a values document
//! - **`dynamic_values.rs`** - Sets, wrappers, unknowns and JSON input
//! - **`custom_options.rs`** - Indentation, limits and set ordering
//!
//! Run any example with: `cargo run --example <name>`

pub mod dynamic;
pub mod emit;
pub mod error;
pub mod macros;
pub mod map;
pub mod normalize;
pub mod number;
pub mod options;
pub mod path;
pub mod prune;
pub mod ser;
pub mod value;

pub use dynamic::{DynamicValue, DynamicValueMap};
pub use emit::{to_yaml_string, Emitter};
pub use error::{Error, Result};
pub use map::{key_order, Mapping};
pub use normalize::{normalize, Normalizer};
pub use number::Decimal;
pub use options::{EncodeOptions, SetOrder};
pub use path::{Path, PathSegment};
pub use prune::prune;
pub use ser::{to_dynamic, DynamicValueSerializer};
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// Encode a host value as a YAML document with default options.
///
/// A `Null` input, or one where every leaf is null, encodes as `""`.
///
/// # Examples
///
/// ```rust
/// use helm_values::{dynamic, encode};
///
/// assert_eq!(encode(&dynamic!({ "a": [1, null, 2] })).unwrap(), "a:\n- 1\n- 2\n");
/// assert_eq!(encode(&dynamic!({ "a": null, "b": { "c": null } })).unwrap(), "");
/// ```
///
/// # Errors
///
/// [`Error::UnsupportedShape`] for unresolved values, [`Error::TooDeep`] for
/// pathological nesting.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(input: &DynamicValue) -> Result<String> {
    encode_with_options(input, &EncodeOptions::default())
}

/// Encode a host value as a YAML document with custom options.
///
/// # Examples
///
/// ```rust
/// use helm_values::{dynamic, encode_with_options, EncodeOptions};
///
/// let options = EncodeOptions::new().with_indent(4);
/// let yaml = encode_with_options(&dynamic!({ "a": { "b": 1 } }), &options).unwrap();
/// assert_eq!(yaml, "a:\n    b: 1\n");
/// ```
///
/// # Errors
///
/// See [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
#[tracing::instrument(level = "debug", skip_all)]
pub fn encode_with_options(input: &DynamicValue, options: &EncodeOptions) -> Result<String> {
    let value = Normalizer::new(options).normalize(input)?;
    render(value, options)
}

/// Prune a canonical value and write what survives as YAML.
///
/// # Examples
///
/// ```rust
/// use helm_values::{render, EncodeOptions, Value};
///
/// let value = Value::List(vec![Value::Absent, Value::from("x")]);
/// assert_eq!(render(value, &EncodeOptions::default()).unwrap(), "- x\n");
/// assert_eq!(render(Value::Absent, &EncodeOptions::default()).unwrap(), "");
/// ```
///
/// # Errors
///
/// [`Error::TooDeep`] from the emitter.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn render(value: Value, options: &EncodeOptions) -> Result<String> {
    let Some(pruned) = prune(value) else {
        tracing::debug!("document pruned to nothing");
        return Ok(String::new());
    };
    let yaml = to_yaml_string(&pruned, options)?;
    tracing::debug!(bytes = yaml.len(), "encoded document");
    Ok(yaml)
}

/// Encode the first argument of a function call, enforcing the caller
/// contract that the top-level value is neither null nor unknown.
///
/// Dynamic wrappers around the top-level value are looked through for the
/// check.
///
/// # Examples
///
/// ```rust
/// use helm_values::{dynamic, encode_argument, Error};
///
/// assert_eq!(encode_argument(&dynamic!({ "a": 1 })).unwrap(), "a: 1\n");
/// assert_eq!(
///     encode_argument(&dynamic!(null)),
///     Err(Error::invalid_argument(0, "Input cannot be null"))
/// );
/// ```
///
/// # Errors
///
/// [`Error::InvalidArgument`] at position 0 for a null or unknown input,
/// otherwise whatever [`encode`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_argument(input: &DynamicValue) -> Result<String> {
    let options = EncodeOptions::default();
    match input.unwrapped(options.max_unwrap) {
        Some(DynamicValue::Null) => Err(Error::invalid_argument(0, "Input cannot be null")),
        Some(DynamicValue::Unknown) => Err(Error::invalid_argument(0, "Input cannot be unknown")),
        _ => encode_with_options(input, &options),
    }
}

/// Serialize any `T: Serialize` to a pruned YAML string.
///
/// # Examples
///
/// ```rust
/// use helm_values::to_string;
/// use std::collections::BTreeMap;
///
/// let mut labels = BTreeMap::new();
/// labels.insert("app", Some("web"));
/// labels.insert("tier", None);
/// assert_eq!(to_string(&labels).unwrap(), "app: web\n");
/// ```
///
/// # Errors
///
/// [`Error::UnsupportedShape`] for shapes a host cannot express, otherwise
/// see [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a pruned YAML string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode_with_options(&to_dynamic(value)?, options)
}

/// Serialize any `T: Serialize` as pruned YAML into a writer.
///
/// # Examples
///
/// ```rust
/// use helm_values::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![Some(1), None, Some(3)]).unwrap();
/// assert_eq!(buffer, b"- 1\n- 3\n");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let yaml = to_string(value)?;
    writer
        .write_all(yaml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
