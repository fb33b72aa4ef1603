use crate::{
    error::TransformError,
    function::Function,
    value::{Tuple, Value},
};

/// Rewrite every key through `f`, which must map text to text.
///
/// Later entries win when two keys map to the same name.
pub fn map_keys(tuple: Tuple, f: &Function) -> Result<Tuple, TransformError> {
    let mut out = Tuple::with_capacity(tuple.len());
    for (key, value) in tuple {
        let key = f.call(Value::Text(key))?.into_text()?;
        out.insert(key, value);
    }

    Ok(out)
}

/// Rewrite every value through `f`.
pub fn map_values(mut tuple: Tuple, f: &Function) -> Result<Tuple, TransformError> {
    for value in tuple.values_mut() {
        *value = f.call(std::mem::replace(value, Value::Null))?;
    }

    Ok(tuple)
}

/// Rewrite the value at `key` through `f`; an absent key is passed as `Null`
/// and the result is inserted.
pub fn map_value(mut tuple: Tuple, key: &str, f: &Function) -> Result<Tuple, TransformError> {
    match tuple.get_mut(key) {
        Some(slot) => *slot = f.call(std::mem::replace(slot, Value::Null))?,
        None => {
            tuple.insert(key, f.call(Value::Null)?);
        }
    }

    Ok(tuple)
}

/// Copying form of [`rename_keys_in_place`].
#[must_use]
pub fn rename_keys(tuple: &Tuple, mapping: &[(String, String)]) -> Tuple {
    let mut out = tuple.clone();
    rename_keys_in_place(&mut out, mapping);
    out
}

/// Rename `from` to `to` for every pair whose `from` key is present.
pub fn rename_keys_in_place(tuple: &mut Tuple, mapping: &[(String, String)]) {
    for (from, to) in mapping {
        if let Some(value) = tuple.remove(from) {
            tuple.insert(to.clone(), value);
        }
    }
}

#[must_use]
pub fn reject_keys(tuple: &Tuple, keys: &[String]) -> Tuple {
    let mut out = tuple.clone();
    reject_keys_in_place(&mut out, keys);
    out
}

pub fn reject_keys_in_place(tuple: &mut Tuple, keys: &[String]) {
    tuple.retain(|key, _| !keys.iter().any(|k| k == key));
}

#[must_use]
pub fn accept_keys(tuple: &Tuple, keys: &[String]) -> Tuple {
    let mut out = tuple.clone();
    accept_keys_in_place(&mut out, keys);
    out
}

pub fn accept_keys_in_place(tuple: &mut Tuple, keys: &[String]) {
    tuple.retain(|key, _| keys.iter().any(|k| k == key));
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fields, tuple};
    use serde_json::json;

    fn upcase() -> Function {
        Function::new("upcase", |v| Ok(Value::from(v.into_text()?.to_uppercase())))
    }

    #[test]
    fn map_keys_rewrites_every_key() {
        let out = map_keys(tuple(json!({ "name": "Jane", "email": "j@d.org" })), &upcase())
            .expect("map should succeed");

        assert_eq!(out, tuple(json!({ "NAME": "Jane", "EMAIL": "j@d.org" })));
    }

    #[test]
    fn map_keys_rejects_non_text_results() {
        let is_empty = Function::new("is_empty", |v| Ok(Value::from(v.into_text()?.is_empty())));

        let err = map_keys(tuple(json!({ "name": 1 })), &is_empty).expect_err("bool key");
        assert!(matches!(err, TransformError::Shape(_)));
    }

    #[test]
    fn map_values_rewrites_every_value() {
        let out = map_values(tuple(json!({ "a": "x", "b": "y" })), &upcase())
            .expect("map should succeed");

        assert_eq!(out, tuple(json!({ "a": "X", "b": "Y" })));
    }

    #[test]
    fn map_value_touches_one_key() {
        let out = map_value(tuple(json!({ "a": "x", "b": "y" })), "a", &upcase())
            .expect("map should succeed");

        assert_eq!(out, tuple(json!({ "a": "X", "b": "y" })));
    }

    #[test]
    fn rename_keys_skips_absent_keys() {
        let mapping = vec![
            ("name".to_string(), "user".to_string()),
            ("missing".to_string(), "other".to_string()),
        ];

        assert_eq!(
            rename_keys(&tuple(json!({ "name": "Jane", "age": 30 })), &mapping),
            tuple(json!({ "user": "Jane", "age": 30 }))
        );
    }

    #[test]
    fn accept_and_reject_are_complements() {
        let input = tuple(json!({ "a": 1, "b": 2, "c": 3 }));
        let keys = fields(&["a", "c"]);

        let mut both = accept_keys(&input, &keys);
        both.merge(reject_keys(&input, &keys));

        assert_eq!(accept_keys(&input, &keys), tuple(json!({ "a": 1, "c": 3 })));
        assert_eq!(reject_keys(&input, &keys), tuple(json!({ "b": 2 })));
        assert_eq!(both, input);
    }
}
