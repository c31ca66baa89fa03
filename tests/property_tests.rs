//! Property-based tests for pruning and rendering.
//!
//! Generated trees mix absent leaves into lists and mappings at every level,
//! so most cases exercise partial and full collapse. Strings built from YAML
//! indicator characters are read back with `serde_yaml` to check that every
//! scalar style the emitter picks parses to the original text.

use helm_values::{prune, render, to_string, EncodeOptions, Mapping, Value};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => Just(Value::Absent),
        1 => any::<bool>().prop_map(Value::from),
        1 => any::<i64>().prop_map(Value::from),
        1 => "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

/// Short strings dense in characters that force quoting or literal blocks.
/// Letters stop at `e` and there are no digits, so no plain word can read as
/// a null, bool or number.
fn awkward_string() -> impl Strategy<Value = String> {
    r#"[a-e #:\-?&*!|>'"%@`,\[\]{}.~\t\n]{0,12}"#
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::List),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..5).prop_map(|entries| {
                Value::Mapping(entries.into_iter().collect::<Mapping>())
            }),
        ]
    })
}

fn is_clean(value: &Value) -> bool {
    match value {
        Value::Absent => false,
        Value::List(items) => !items.is_empty() && items.iter().all(is_clean),
        Value::Mapping(map) => !map.is_empty() && map.values().all(is_clean),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
    }
}

fn has_scalar(value: &Value) -> bool {
    match value {
        Value::Absent => false,
        Value::List(items) => items.iter().any(has_scalar),
        Value::Mapping(map) => map.values().any(has_scalar),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
    }
}

proptest! {
    #[test]
    fn prop_prune_leaves_no_absent_or_empty_container(value in tree()) {
        if let Some(pruned) = prune(value) {
            prop_assert!(is_clean(&pruned));
        }
    }

    #[test]
    fn prop_prune_is_idempotent(value in tree()) {
        let once = prune(value);
        let twice = once.clone().and_then(prune);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_prune_keeps_tree_iff_it_has_a_scalar(value in tree()) {
        let expected = has_scalar(&value);
        prop_assert_eq!(prune(value).is_some(), expected);
    }

    #[test]
    fn prop_render_is_empty_exactly_when_pruned_away(value in tree()) {
        let survives = prune(value.clone()).is_some();
        let yaml = render(value, &EncodeOptions::default()).unwrap();
        if survives {
            prop_assert!(yaml.ends_with('\n'));
        } else {
            prop_assert_eq!(yaml, "");
        }
    }

    #[test]
    fn prop_render_is_deterministic(value in tree()) {
        let options = EncodeOptions::default();
        let first = render(value.clone(), &options).unwrap();
        let second = render(value, &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_list_order_preserved(items in prop::collection::vec(proptest::option::of(any::<i64>()), 0..12)) {
        let expected: String = items
            .iter()
            .flatten()
            .map(|n| format!("- {}\n", n))
            .collect();
        prop_assert_eq!(to_string(&items).unwrap(), expected);
    }

    #[test]
    fn prop_lowercase_keys_sorted(entries in prop::collection::hash_map("k[a-z]{1,6}", any::<i32>(), 1..8)) {
        let sorted: BTreeMap<_, _> = entries.iter().collect();
        let expected: String = sorted
            .iter()
            .map(|(key, value)| format!("{}: {}\n", key, value))
            .collect();
        prop_assert_eq!(to_string(&entries).unwrap(), expected);
    }

    #[test]
    fn prop_nulls_in_maps_dropped(entries in prop::collection::btree_map("k[a-z]{1,6}", proptest::option::of(any::<bool>()), 0..8)) {
        let expected: String = entries
            .iter()
            .filter_map(|(key, value)| value.map(|b| format!("{}: {}\n", key, b)))
            .collect();
        prop_assert_eq!(to_string(&entries).unwrap(), expected);
    }

    #[test]
    fn prop_indent_step_applies_to_nested_mappings(indent in 2usize..=9, n in any::<i64>()) {
        let mut inner = Mapping::new();
        inner.insert("b".to_string(), Value::from(n));
        let mut outer = Mapping::new();
        outer.insert("a".to_string(), Value::Mapping(inner));

        let options = EncodeOptions::new().with_indent(indent);
        let yaml = render(Value::Mapping(outer), &options).unwrap();
        prop_assert_eq!(yaml, format!("a:\n{}b: {}\n", " ".repeat(indent), n));
    }

    #[test]
    fn prop_awkward_strings_read_back_from_lists(items in prop::collection::vec(awkward_string(), 1..8)) {
        let yaml = to_string(&items).unwrap();
        let parsed: Vec<serde_yaml::Value> = serde_yaml::from_str(&yaml).unwrap();
        let expected: Vec<serde_yaml::Value> =
            items.into_iter().map(serde_yaml::Value::String).collect();
        prop_assert_eq!(parsed, expected, "yaml was:\n{}", yaml);
    }

    #[test]
    fn prop_awkward_keys_and_values_read_back_from_mappings(
        entries in prop::collection::btree_map(awkward_string(), awkward_string(), 1..6)
    ) {
        let yaml = to_string(&entries).unwrap();
        let parsed: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(&yaml).unwrap();
        let expected: BTreeMap<String, serde_yaml::Value> = entries
            .into_iter()
            .map(|(key, value)| (key, serde_yaml::Value::String(value)))
            .collect();
        prop_assert_eq!(parsed, expected, "yaml was:\n{}", yaml);
    }
}
