//! Error types for normalization, pruning and YAML encoding.
//!
//! Every failure is terminal for a single invocation: the same input always
//! produces the same error, so nothing is retried internally.
//!
//! ## Error Categories
//!
//! - **Input shape**: the input holds a value the normalizer cannot map to a
//!   canonical value ([`Error::UnsupportedShape`])
//! - **Resource limits**: nesting or wrapper chains deeper than configured
//!   ([`Error::TooDeep`])
//! - **Encoding**: the pruned tree cannot be written as YAML
//!   ([`Error::Encoding`]). Every canonical tree currently has a YAML form,
//!   so the emitter does not produce this variant
//! - **Arguments**: caller preconditions on the top-level input
//!   ([`Error::InvalidArgument`])
//!
//! Shape, depth and encoding errors carry the [`Path`] of the offending value.
//!
//! ## Examples
//!
//! ```rust
//! use helm_values::{dynamic, encode, Error};
//!
//! let input = dynamic!({ "image": { "tag": unknown } });
//! match encode(&input) {
//!     Err(Error::UnsupportedShape { shape, path }) => {
//!         assert_eq!(shape, "unknown");
//!         assert_eq!(path.to_string(), ".image.tag");
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use crate::Path;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value whose runtime shape has no canonical counterpart
    #[error("Unsupported value shape `{shape}` at {path}")]
    UnsupportedShape { shape: String, path: Path },

    /// Nesting or wrapper unwrapping exceeded the configured limit
    #[error("Value nested deeper than {limit} levels at {path}")]
    TooDeep { limit: usize, path: Path },

    /// The pruned tree could not be rendered. Reserved: the emitter has a
    /// YAML form for every canonical tree
    #[error("Failed to encode YAML at {path}: {detail}")]
    Encoding { detail: String, path: Path },

    /// A caller precondition on a function argument was violated
    #[error("Invalid value for argument {position}: {msg}")]
    InvalidArgument { position: usize, msg: String },

    /// Writing the rendered document failed
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed decimal number text
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported shape error for the value at `path`.
    ///
    /// ```rust
    /// use helm_values::{Error, Path};
    ///
    /// let err = Error::unsupported_shape("unknown", Path::root());
    /// assert_eq!(err.to_string(), "Unsupported value shape `unknown` at .");
    /// ```
    pub fn unsupported_shape(shape: &str, path: Path) -> Self {
        Error::UnsupportedShape {
            shape: shape.to_string(),
            path,
        }
    }

    pub fn too_deep(limit: usize, path: Path) -> Self {
        Error::TooDeep { limit, path }
    }

    pub fn encoding<T: fmt::Display>(detail: T, path: Path) -> Self {
        Error::Encoding {
            detail: detail.to_string(),
            path,
        }
    }

    /// Creates an argument error; `position` is zero-based.
    pub fn invalid_argument(position: usize, msg: &str) -> Self {
        Error::InvalidArgument {
            position,
            msg: msg.to_string(),
        }
    }

    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    pub fn invalid_number<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidNumber(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// The path of the offending value, for errors that track one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::UnsupportedShape { path, .. }
            | Error::TooDeep { path, .. }
            | Error::Encoding { path, .. } => Some(path),
            Error::InvalidArgument { .. }
            | Error::Io(_)
            | Error::InvalidNumber(_)
            | Error::Custom(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
