use super::group::group;
use crate::value::{Sequence, ShapeError, Tuple, Value};

/// Split one record into several, one per distinct combination of the
/// non-`subkeys` fields of the tuples listed at `field`.
///
/// Child tuples are first backfilled with `Null` so all share the same keys.
/// `subkeys` are promoted to the top level of each output record and the
/// remaining child fields stay nested under `field`. The record's own fields
/// are copied into every output and win on collision.
///
/// An absent, `Null`, or empty list yields the record without `field`.
pub fn split(mut tuple: Tuple, field: &str, subkeys: &[String]) -> Result<Sequence, ShapeError> {
    let items = match tuple.remove(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => value.into_sequence()?,
    };
    if items.is_empty() {
        return Ok(vec![tuple]);
    }

    let existing = existing_keys(&items);
    let items = backfill(items, &existing);

    let nested: Vec<String> = existing
        .into_iter()
        .filter(|key| !subkeys.contains(key))
        .collect();
    let rows = if nested.is_empty() {
        items
    } else {
        group(items, field, &nested)
    };

    Ok(rows
        .into_iter()
        .map(|mut row| {
            row.merge(tuple.clone());
            row
        })
        .collect())
}

// Every key used by any child, in first-seen order.
fn existing_keys(items: &[Tuple]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in items.iter().flat_map(|item| item.keys()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }

    keys
}

fn backfill(items: Sequence, keys: &[String]) -> Sequence {
    items
        .into_iter()
        .map(|mut item| {
            for key in keys {
                if !item.contains_key(key) {
                    item.insert(key.clone(), Value::Null);
                }
            }
            item
        })
        .collect()
}
