use crate::{
    error::TransformError,
    function::Function,
    reshape::nest_in_place,
    value::{Sequence, Tuple, Value},
};

/// Apply `f` to every item, failing on the first error.
pub fn map_array(items: Vec<Value>, f: &Function) -> Result<Vec<Value>, TransformError> {
    items.into_iter().map(|item| f.call(item)).collect()
}

/// Nest the listed fields of every record under `root`.
#[must_use]
pub fn wrap(sequence: Sequence, root: &str, fields: &[String]) -> Sequence {
    sequence
        .into_iter()
        .map(|mut record| {
            nest_in_place(&mut record, root, fields);
            record
        })
        .collect()
}

/// The value at `key` of every record, `Null` where absent.
#[must_use]
pub fn extract_key(sequence: &[Tuple], key: &str) -> Vec<Value> {
    sequence.iter().map(|record| record.get_or_null(key)).collect()
}

/// Wrap every item in a single-field record.
#[must_use]
pub fn insert_key(items: Vec<Value>, key: &str) -> Sequence {
    items
        .into_iter()
        .map(|item| std::iter::once((key, item)).collect())
        .collect()
}

/// Give every record each listed key, `Null` where it was absent.
#[must_use]
pub fn add_keys(sequence: Sequence, keys: &[String]) -> Sequence {
    sequence
        .into_iter()
        .map(|mut record| {
            for key in keys {
                if !record.contains_key(key) {
                    record.insert(key.clone(), Value::Null);
                }
            }
            record
        })
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_support::{fields, seq, value},
        value::{ShapeError, ValueKind},
    };
    use serde_json::json;

    #[test]
    fn map_array_applies_function_to_each_item() {
        let upcase = Function::new("upcase", |v| Ok(Value::from(v.into_text()?.to_uppercase())));
        let out = map_array(vec![Value::from("foo"), Value::from("bar")], &upcase)
            .expect("map should succeed");

        assert_eq!(out, vec![Value::from("FOO"), Value::from("BAR")]);
    }

    #[test]
    fn map_array_stops_at_first_failure() {
        let reject = Function::new("reject", |v| {
            Err(ShapeError::mismatch(ValueKind::Tuple, v).into())
        });

        assert!(map_array(vec![Value::Int(1)], &reject).is_err());
    }

    #[test]
    fn wrap_nests_each_record() {
        let out = wrap(
            seq(json!([{ "city": "NYC", "zipcode": "123" }])),
            "address",
            &fields(&["city", "zipcode"]),
        );

        assert_eq!(out, seq(json!([{ "address": { "city": "NYC", "zipcode": "123" } }])));
    }

    #[test]
    fn extract_key_reads_null_for_missing() {
        let records = seq(json!([
            { "name": "Alice", "role": "sender" },
            { "name": "Bob", "role": "receiver" },
            { "role": "listener" }
        ]));

        assert_eq!(
            Value::List(extract_key(&records, "name")),
            value(json!(["Alice", "Bob", null]))
        );
    }

    #[test]
    fn insert_key_wraps_values() {
        let out = insert_key(vec![Value::from("Alice"), Value::Null], "name");

        assert_eq!(out, seq(json!([{ "name": "Alice" }, { "name": null }])));
    }

    #[test]
    fn add_keys_backfills_missing() {
        let out = add_keys(
            seq(json!([{ "name": "Alice" }, { "email": "bob@doe.org" }])),
            &fields(&["name", "email"]),
        );

        assert_eq!(
            out,
            seq(json!([
                { "name": "Alice", "email": null },
                { "name": null, "email": "bob@doe.org" }
            ]))
        );
    }
}
