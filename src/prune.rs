//! Bottom-up removal of absent values.
//!
//! Pruning drops every [`Value::Absent`], then drops any list or mapping left
//! without members, repeating upwards. Scalars are never removed: `false`,
//! `0` and `""` survive.
//!
//! ```rust
//! use helm_values::{prune, Mapping, Value};
//!
//! let mut inner = Mapping::new();
//! inner.insert("c".to_string(), Value::Absent);
//! let mut outer = Mapping::new();
//! outer.insert("a".to_string(), Value::Absent);
//! outer.insert("b".to_string(), Value::Mapping(inner));
//!
//! assert_eq!(prune(Value::Mapping(outer)), None);
//! assert_eq!(prune(Value::from(false)), Some(Value::from(false)));
//! ```

use crate::{Mapping, Value};

/// Prunes `value`, returning `None` when nothing survives.
///
/// Surviving list elements keep their relative order. The result contains no
/// `Absent` node and no empty container.
#[must_use]
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Absent => None,
        Value::List(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune).collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::List(kept))
            }
        }
        Value::Mapping(map) => {
            let kept: Mapping = map
                .into_iter()
                .filter_map(|(key, value)| prune(value).map(|value| (key, value)))
                .collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::Mapping(kept))
            }
        }
        scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_)) => Some(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_scalars_survive() {
        assert_eq!(prune(Value::from(0)), Some(Value::from(0)));
        assert_eq!(prune(Value::from("")), Some(Value::from("")));
        assert_eq!(prune(Value::from(false)), Some(Value::from(false)));
        assert_eq!(prune(Value::Absent), None);
    }

    #[test]
    fn test_list_keeps_order_of_survivors() {
        let list = Value::List(vec![
            Value::from(1),
            Value::Absent,
            Value::from(2),
            Value::List(vec![Value::Absent]),
            Value::from(3),
        ]);
        assert_eq!(
            prune(list),
            Some(Value::List(vec![Value::from(1), Value::from(2), Value::from(3)]))
        );
    }

    #[test]
    fn test_empty_containers_collapse() {
        assert_eq!(prune(Value::List(vec![])), None);
        assert_eq!(prune(Value::Mapping(Mapping::new())), None);
        assert_eq!(prune(Value::List(vec![Value::Absent, Value::Absent])), None);
        assert_eq!(
            prune(map(vec![("a", Value::Absent), ("b", map(vec![("c", Value::Absent)]))])),
            None
        );
    }

    #[test]
    fn test_collapse_propagates_only_as_far_as_needed() {
        let value = map(vec![
            ("keep", Value::from("x")),
            ("drop", map(vec![("inner", Value::List(vec![Value::Absent]))])),
        ]);
        assert_eq!(prune(value), Some(map(vec![("keep", Value::from("x"))])));
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let value = map(vec![
            ("a", Value::List(vec![Value::from(1), Value::Absent])),
            ("b", Value::Absent),
            ("c", map(vec![("d", Value::from(true))])),
        ]);
        let once = prune(value).unwrap();
        assert_eq!(prune(once.clone()), Some(once));
    }
}
