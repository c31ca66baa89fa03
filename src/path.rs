//! Breadcrumb paths into a value tree.
//!
//! A [`Path`] records the chain of mapping keys and list indices leading to
//! the value an error refers to, so that a caller can point at the offending
//! field instead of the whole document.
//!
//! ```rust
//! use helm_values::{Path, PathSegment};
//!
//! let path: Path = vec![
//!     PathSegment::Key("service".to_string()),
//!     PathSegment::Key("ports".to_string()),
//!     PathSegment::Index(0),
//! ]
//! .into_iter()
//! .collect();
//! assert_eq!(path.to_string(), ".service.ports[0]");
//! ```

use std::fmt;

/// One step in a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// The location of a value inside a document, root first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The path of the document root.
    #[must_use]
    pub const fn root() -> Self {
        Path(Vec::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns a copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }
}

impl From<&[PathSegment]> for Path {
    fn from(segments: &[PathSegment]) -> Self {
        Path(segments.to_vec())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Path(iter.into_iter().collect())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) if is_identifier(key) => write!(f, ".{}", key)?,
                PathSegment::Key(key) => write!(f, "[{:?}]", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
