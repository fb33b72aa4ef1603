use super::split::split;
use crate::value::{Sequence, ShapeError, Tuple, Value};
use std::collections::HashMap;

/// Partition `sequence` by every field not in `fields`, collecting the listed
/// fields of each record into a list under `new_field`.
///
/// Groups come out in first-seen order. A record that already holds tuples
/// under `new_field` contributes each of them merged with its capture. A
/// record with none of the listed fields contributes no capture, though its
/// group still gets a (possibly empty) list.
#[must_use]
pub fn group(sequence: Sequence, new_field: &str, fields: &[String]) -> Sequence {
    let mut groups: Vec<(Tuple, Sequence)> = Vec::new();
    let mut positions: HashMap<Tuple, usize> = HashMap::new();

    for mut record in sequence {
        let previous = record.remove(new_field).map(previous_entries);
        let capture = capture(&mut record, fields);

        let children: Sequence = match (previous, capture) {
            (Some(entries), capture) if !entries.is_empty() => entries
                .into_iter()
                .map(|mut entry| {
                    if let Some(capture) = &capture {
                        entry.merge(capture.clone());
                    }
                    entry
                })
                .collect(),
            (_, capture) => capture.into_iter().collect(),
        };

        if let Some(&position) = positions.get(&record) {
            groups[position].1.extend(children);
        } else {
            positions.insert(record.clone(), groups.len());
            groups.push((record, children));
        }
    }

    groups
        .into_iter()
        .map(|(mut root, children)| {
            root.insert(new_field, Value::from_sequence(children));
            root
        })
        .collect()
}

/// Expand the tuple list at `field` of every record into one row per entry.
///
/// Records with an empty or absent list yield one row without `field`.
pub fn ungroup(sequence: Sequence, field: &str, fields: &[String]) -> Result<Sequence, ShapeError> {
    let mut out = Vec::with_capacity(sequence.len());
    for record in sequence {
        out.extend(split(record, field, fields)?);
    }

    Ok(out)
}

// Take the listed fields out of `record`; `None` when none of them is present.
fn capture(record: &mut Tuple, fields: &[String]) -> Option<Tuple> {
    if !fields.iter().any(|field| record.contains_key(field)) {
        return None;
    }

    Some(
        fields
            .iter()
            .map(|field| {
                let value = record.remove(field).unwrap_or(Value::Null);
                (field.clone(), value)
            })
            .collect(),
    )
}

// Tuples already grouped under the target field; anything else is discarded.
fn previous_entries(value: Value) -> Sequence {
    match value {
        Value::List(items) => items
            .into_iter()
            .filter_map(|item| item.into_tuple().ok())
            .collect(),
        _ => Vec::new(),
    }
}
