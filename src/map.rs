//! Keyed mappings of the canonical value tree.
//!
//! [`Mapping`] wraps an [`IndexMap`] so keys stay unique and iteration follows
//! insertion order. Insertion order carries no meaning: the emitter writes
//! keys in [`key_order`], and equality ignores order.
//!
//! ## Examples
//!
//! ```rust
//! use helm_values::{Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("name".to_string(), Value::from("web"));
//! map.insert("replicas".to_string(), Value::from(3));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("web"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// A mapping of unique string keys to canonical values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Entries in the order the emitter writes them.
    ///
    /// ```rust
    /// use helm_values::{Mapping, Value};
    ///
    /// let map: Mapping = ["port10", "port2", "name"]
    ///     .iter()
    ///     .map(|k| (k.to_string(), Value::from(true)))
    ///     .collect();
    /// let keys: Vec<_> = map.sorted_entries().into_iter().map(|(k, _)| k.as_str()).collect();
    /// assert_eq!(keys, vec!["name", "port2", "port10"]);
    /// ```
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|(a, _), (b, _)| key_order(a, b));
        entries
    }
}

/// The key order YAML emitters use for mappings.
///
/// Runs of ASCII digits compare by numeric value (`a2` < `a10`). Where the
/// keys first differ, two letters compare by code point; a non-letter sorts
/// before a letter, except right after a shared digit run where the letter
/// sorts first. Otherwise a shorter key that is a prefix of a longer one
/// sorts first.
#[must_use]
pub fn key_order(a: &str, b: &str) -> Ordering {
    let ar: Vec<char> = a.chars().collect();
    let br: Vec<char> = b.chars().collect();
    let mut digits = false;

    for i in 0..ar.len().min(br.len()) {
        if ar[i] == br[i] {
            digits = ar[i].is_ascii_digit();
            continue;
        }

        let al = ar[i].is_alphabetic();
        let bl = br[i].is_alphabetic();
        if al && bl {
            return ar[i].cmp(&br[i]);
        }
        if al || bl {
            let a_first = if digits { al } else { bl };
            return if a_first {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let mut an: i64 = 0;
        let mut bn: i64 = 0;
        if ar[i] == '0' || br[i] == '0' {
            // zeros inside a number are significant, leading zeros are not
            for j in (0..i).rev() {
                if !ar[j].is_ascii_digit() {
                    break;
                }
                if ar[j] != '0' {
                    an = 1;
                    bn = 1;
                    break;
                }
            }
        }
        let (an, a_end) = accumulate_digits(&ar, i, an);
        let (bn, b_end) = accumulate_digits(&br, i, bn);
        if an != bn {
            return an.cmp(&bn);
        }
        if a_end != b_end {
            return a_end.cmp(&b_end);
        }
        return ar[i].cmp(&br[i]);
    }

    ar.len().cmp(&br.len())
}

fn accumulate_digits(chars: &[char], start: usize, seed: i64) -> (i64, usize) {
    let mut n = seed;
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        let digit = i64::from(chars[end] as u8 - b'0');
        n = n.wrapping_mul(10).wrapping_add(digit);
        end += 1;
    }
    (n, end)
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Mapping(IndexMap::from_iter(iter))
    }
}
