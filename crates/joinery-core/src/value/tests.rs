use crate::{
    test_support::{tuple, value},
    tuple,
    value::{Float64, ShapeError, Tuple, Value, ValueKind},
};
use serde_json::json;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

// ---- helpers -----------------------------------------------------------

fn hash_of<T: Hash>(item: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    hasher.finish()
}

// ---- tuple -------------------------------------------------------------

#[test]
fn tuple_equality_ignores_insertion_order() {
    let left = tuple! { "name" => "Jane", "email" => "jane@doe.org" };
    let right = tuple! { "email" => "jane@doe.org", "name" => "Jane" };

    assert_eq!(left, right);
    assert_eq!(hash_of(&left), hash_of(&right));
}

#[test]
fn tuple_equality_requires_same_keys() {
    let left = tuple! { "name" => "Jane" };
    let right = tuple! { "name" => "Jane", "email" => Value::Null };

    assert_ne!(left, right);
}

#[test]
fn tuple_insert_replaces_in_place() {
    let mut t = tuple! { "a" => 1, "b" => 2, "c" => 3 };
    let previous = t.insert("b", Value::from("two"));

    assert_eq!(previous, Some(Value::Int(2)));
    assert_eq!(t.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(t.get("b"), Some(&Value::from("two")));
}

#[test]
fn tuple_remove_keeps_remaining_order() {
    let mut t = tuple! { "a" => 1, "b" => 2, "c" => 3 };

    assert_eq!(t.remove("b"), Some(Value::Int(2)));
    assert_eq!(t.remove("missing"), None);
    assert_eq!(t.keys().collect::<Vec<_>>(), vec!["a", "c"]);
}

#[test]
fn tuple_take_keys_preserves_tuple_order() {
    let mut t = tuple! { "a" => 1, "b" => 2, "c" => 3 };
    let taken = t.take_keys(&["c".to_string(), "a".to_string(), "zz".to_string()]);

    assert_eq!(taken.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    assert_eq!(t.keys().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn tuple_merge_overrides_existing_keys() {
    let mut t = tuple! { "a" => 1, "b" => 2 };
    t.merge(tuple! { "b" => 20, "c" => 30 });

    assert_eq!(t, tuple! { "a" => 1, "b" => 20, "c" => 30 });
}

#[test]
fn get_or_null_reads_absent_as_null() {
    let t = tuple! { "a" => 1 };

    assert_eq!(t.get_or_null("a"), Value::Int(1));
    assert_eq!(t.get_or_null("b"), Value::Null);
}

// ---- value -------------------------------------------------------------

#[test]
fn kind_reports_containers() {
    assert!(Value::List(vec![]).is_container());
    assert!(Value::Tuple(Tuple::new()).is_container());
    assert!(!Value::Null.is_container());
    assert!(!Value::from("x").is_container());
    assert_eq!(Value::from(1u64).kind(), ValueKind::Uint);
}

#[test]
fn into_sequence_reports_offending_element() {
    let list = Value::List(vec![Value::Tuple(Tuple::new()), Value::from(7)]);
    let err = list.into_sequence().expect_err("non-tuple element should fail");

    assert_eq!(
        err,
        ShapeError::element(1, ValueKind::Tuple, Value::from(7))
    );
    assert_eq!(err.found(), &Value::Int(7));
    assert_eq!(err.to_string(), "expected tuple at index 1, found int");
}

#[test]
fn into_sequence_or_empty_accepts_null() {
    let seq = Value::Null
        .into_sequence_or_empty()
        .expect("null should read as empty");

    assert!(seq.is_empty());
}

#[test]
fn float_values_hash_consistently() {
    let a = Value::Float(Float64::try_new(-0.0).expect("finite"));
    let b = Value::Float(Float64::try_new(0.0).expect("finite"));

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

// ---- wire --------------------------------------------------------------

#[test]
fn decodes_json_shapes() {
    let v = value(json!({
        "name": "Jane",
        "age": 30,
        "score": 1.5,
        "tags": ["a", "b"],
        "address": { "city": null }
    }));

    let Value::Tuple(t) = v else {
        panic!("tuple expected");
    };
    assert_eq!(t.get("age"), Some(&Value::Int(30)));
    assert_eq!(
        t.get("tags"),
        Some(&Value::List(vec![Value::from("a"), Value::from("b")]))
    );
    assert_eq!(
        t.get("address"),
        Some(&Value::Tuple(tuple! { "city" => Value::Null }))
    );
}

#[test]
fn large_unsigned_stays_unsigned() {
    let v = value(json!(u64::MAX));

    assert_eq!(v, Value::Uint(u64::MAX));
}

#[test]
fn encode_then_decode_preserves_structure() {
    let original = tuple(json!({
        "name": "Joe",
        "tasks": [{ "title": "a", "priority": 1 }, { "priority": 2 }]
    }));

    let encoded = serde_json::to_string(&original).expect("encode");
    let decoded: Tuple = serde_json::from_str(&encoded).expect("decode");

    assert_eq!(decoded, original);
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = serde_json::from_str::<Value>(r#"{"a": 1, "a": 2}"#)
        .expect_err("duplicate keys should fail");

    assert!(err.to_string().contains("duplicate tuple key 'a'"));
}
