//! Configuration options for encoding.
//!
//! This module provides types to customize normalization limits and the
//! YAML output:
//!
//! - [`EncodeOptions`]: Main configuration struct
//! - [`SetOrder`]: How unordered host collections are enumerated
//!
//! ## Examples
//!
//! ```rust
//! use helm_values::{dynamic, encode_with_options, EncodeOptions, SetOrder};
//!
//! let input = dynamic!({ "zones": set ["b", "c", "a"] });
//!
//! let options = EncodeOptions::new().with_set_order(SetOrder::Sorted);
//! let yaml = encode_with_options(&input, &options).unwrap();
//! assert_eq!(yaml, "zones:\n- a\n- b\n- c\n");
//! ```

/// Default indentation step for nested mappings.
pub const DEFAULT_INDENT: usize = 2;

/// Default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default maximum length of a chain of dynamic wrappers.
pub const DEFAULT_MAX_UNWRAP: usize = 64;

/// Enumeration order for unordered host collections.
///
/// Hosts do not promise a stable iteration order for sets, so by default the
/// output order of set elements follows whatever order the host supplied.
///
/// ```rust
/// use helm_values::SetOrder;
///
/// assert_eq!(SetOrder::default(), SetOrder::Host);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SetOrder {
    /// Keep the host's enumeration order.
    #[default]
    Host,
    /// Sort elements by [`Value::total_cmp`](crate::Value::total_cmp) for
    /// reproducible output across runs.
    Sorted,
}

/// Configuration options for encoding.
///
/// ```rust
/// use helm_values::EncodeOptions;
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_max_depth(32)
///     .with_unknown_as_absent(true);
/// assert_eq!(options.indent, 4);
/// assert_eq!(options.max_depth, 32);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Spaces per nested mapping level, 2 through 9.
    pub indent: usize,
    /// Containers nested deeper than this fail with `TooDeep`.
    pub max_depth: usize,
    /// Chains of more dynamic wrappers than this fail with `TooDeep`.
    pub max_unwrap: usize,
    pub set_order: SetOrder,
    /// Treat unresolved values below the top level as absent instead of
    /// failing. Only sound when the host guarantees such values are
    /// placeholders for optional fields.
    pub unknown_as_absent: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: DEFAULT_INDENT,
            max_depth: DEFAULT_MAX_DEPTH,
            max_unwrap: DEFAULT_MAX_UNWRAP,
            set_order: SetOrder::default(),
            unknown_as_absent: false,
        }
    }
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation step. Values outside 2..=9 fall back to 2 when
    /// rendering.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_unwrap(mut self, max_unwrap: usize) -> Self {
        self.max_unwrap = max_unwrap;
        self
    }

    #[must_use]
    pub fn with_set_order(mut self, set_order: SetOrder) -> Self {
        self.set_order = set_order;
        self
    }

    #[must_use]
    pub fn with_unknown_as_absent(mut self, unknown_as_absent: bool) -> Self {
        self.unknown_as_absent = unknown_as_absent;
        self
    }

    /// The indentation step actually used by the emitter.
    #[must_use]
    pub(crate) fn effective_indent(&self) -> usize {
        if (2..=9).contains(&self.indent) {
            self.indent
        } else {
            DEFAULT_INDENT
        }
    }
}
