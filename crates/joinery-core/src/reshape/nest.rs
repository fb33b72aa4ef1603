use crate::value::{ShapeError, Tuple, Value, ValueKind};

///
/// UnwrapOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UnwrapOptions {
    /// Lift `root.field` as `root_field`.
    pub prefix: bool,
}

impl UnwrapOptions {
    #[must_use]
    pub const fn prefixed() -> Self {
        Self { prefix: true }
    }

    /// Read options from a tuple argument such as `{prefix: true}`.
    pub fn from_tuple(tuple: &Tuple) -> Result<Self, ShapeError> {
        let mut options = Self::default();
        for (key, value) in tuple.iter() {
            match (key, value) {
                ("prefix", Value::Bool(prefix)) => options.prefix = *prefix,
                ("prefix", other) => {
                    return Err(ShapeError::mismatch(ValueKind::Bool, other.clone()));
                }
                _ => {}
            }
        }

        Ok(options)
    }
}

///
/// NEST
///

/// Copying form of [`nest_in_place`].
#[must_use]
pub fn nest(tuple: &Tuple, root: &str, fields: &[String]) -> Tuple {
    let mut out = tuple.clone();
    nest_in_place(&mut out, root, fields);
    out
}

/// Move the listed top-level fields into the sub-tuple at `root`.
///
/// An existing sub-tuple absorbs the moved fields; any other value at `root`
/// is replaced. `root` always ends up holding a tuple.
pub fn nest_in_place(tuple: &mut Tuple, root: &str, fields: &[String]) {
    let moved = tuple.take_keys(fields);

    match tuple.get_mut(root) {
        Some(Value::Tuple(existing)) => existing.merge(moved),
        _ => {
            tuple.insert(root, Value::Tuple(moved));
        }
    }
}

///
/// UNWRAP
///

/// Copying form of [`unwrap_in_place`].
#[must_use]
pub fn unwrap(
    tuple: &Tuple,
    root: &str,
    selected: Option<&[String]>,
    options: UnwrapOptions,
) -> Tuple {
    let mut out = tuple.clone();
    unwrap_in_place(&mut out, root, selected, options);
    out
}

/// Lift fields out of the sub-tuple at `root`.
///
/// With no `selected` list every sub-field is lifted. Selected fields missing
/// from the sub-tuple lift as `Null`. `root` is removed once the sub-tuple is
/// empty. A missing or non-tuple `root` is left alone.
pub fn unwrap_in_place(
    tuple: &mut Tuple,
    root: &str,
    selected: Option<&[String]>,
    options: UnwrapOptions,
) {
    let Some(Value::Tuple(nested)) = tuple.get_mut(root) else {
        return;
    };

    let keys: Vec<String> = match selected {
        Some(fields) => fields.to_vec(),
        None => nested.keys().map(ToString::to_string).collect(),
    };
    let lifted: Vec<(String, Value)> = keys
        .into_iter()
        .map(|key| {
            let value = nested.remove(&key).unwrap_or(Value::Null);
            (key, value)
        })
        .collect();

    if nested.is_empty() {
        tuple.remove(root);
    }

    for (key, value) in lifted {
        let name = if options.prefix {
            format!("{root}_{key}")
        } else {
            key
        };
        tuple.insert(name, value);
    }
}

///
/// FOLD
///

/// Copying form of [`fold_in_place`].
pub fn fold(tuple: &Tuple, field: &str, subfield: &str) -> Result<Tuple, ShapeError> {
    let mut out = tuple.clone();
    fold_in_place(&mut out, field, subfield)?;

    Ok(out)
}

/// Replace the tuple list at `field` with each element's `subfield` value.
///
/// Elements lacking `subfield` contribute `Null`. An absent or `Null` field
/// is left as is.
pub fn fold_in_place(tuple: &mut Tuple, field: &str, subfield: &str) -> Result<(), ShapeError> {
    let Some(current) = tuple.get_mut(field) else {
        return Ok(());
    };
    let items = match &*current {
        Value::Null => return Ok(()),
        Value::List(items) => items,
        other => return Err(ShapeError::mismatch(ValueKind::List, other.clone())),
    };

    let folded = items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Tuple(element) => Ok(element.get_or_null(subfield)),
            other => Err(ShapeError::element(index, ValueKind::Tuple, other.clone())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    *current = Value::List(folded);

    Ok(())
}
