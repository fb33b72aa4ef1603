//! Join-key projection.
//!
//! A projection reads an ordered list of fields from a tuple. Single-field
//! projections yield the bare value; multi-field projections yield an ordered
//! list. Both are hashable and compare by value, and absent fields read as
//! `Value::Null`, which is itself a matchable key.

use crate::value::{Tuple, Value};
use smallvec::SmallVec;

///
/// JoinKey
///
/// Single and composite keys are structurally distinct shapes; one
/// `GroupIndex` only ever holds one of them.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum JoinKey {
    Single(Value),
    Composite(SmallVec<[Value; 4]>),
}

impl JoinKey {
    /// True when every component of the key is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Single(value) => value.is_null(),
            Self::Composite(values) => values.iter().all(Value::is_null),
        }
    }
}

///
/// KeyProjection
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyProjection {
    Single(String),
    Composite(Vec<String>),
}

impl KeyProjection {
    /// Pick the single-field form when exactly one field is given.
    #[must_use]
    pub fn new(mut fields: Vec<String>) -> Self {
        if fields.len() == 1 {
            Self::Single(fields.remove(0))
        } else {
            Self::Composite(fields)
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Single(field) => std::slice::from_ref(field),
            Self::Composite(fields) => fields,
        }
    }

    #[must_use]
    pub fn extract(&self, tuple: &Tuple) -> JoinKey {
        match self {
            Self::Single(field) => JoinKey::Single(tuple.get_or_null(field)),
            Self::Composite(fields) => {
                JoinKey::Composite(fields.iter().map(|f| tuple.get_or_null(f)).collect())
            }
        }
    }
}

/// Project `fields` out of `tuple` without building a reusable projection.
#[must_use]
pub fn extract(tuple: &Tuple, fields: &[String]) -> JoinKey {
    match fields {
        [field] => JoinKey::Single(tuple.get_or_null(field)),
        _ => JoinKey::Composite(fields.iter().map(|f| tuple.get_or_null(f)).collect()),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_support::fields, tuple};
    use smallvec::smallvec;

    #[test]
    fn single_field_yields_bare_value() {
        let projection = KeyProjection::new(fields(&["name"]));
        let key = projection.extract(&tuple! { "name" => "Jane", "age" => 30 });

        assert_eq!(key, JoinKey::Single(Value::from("Jane")));
    }

    #[test]
    fn composite_preserves_field_order() {
        let projection = KeyProjection::new(fields(&["b", "a"]));
        let key = projection.extract(&tuple! { "a" => 1, "b" => 2 });

        assert_eq!(key, JoinKey::Composite(smallvec![Value::Int(2), Value::Int(1)]));
    }

    #[test]
    fn absent_fields_read_as_null() {
        let single = KeyProjection::new(fields(&["missing"]));
        let composite = KeyProjection::new(fields(&["a", "missing"]));
        let t = tuple! { "a" => 1 };

        assert!(single.extract(&t).is_null());
        assert_eq!(
            composite.extract(&t),
            JoinKey::Composite(smallvec![Value::Int(1), Value::Null])
        );
        assert!(!composite.extract(&t).is_null());
    }

    #[test]
    fn equal_tuples_yield_equal_keys() {
        let projection = KeyProjection::new(fields(&["a", "b"]));
        let left = tuple! { "a" => 1, "b" => "x", "c" => true };
        let right = tuple! { "b" => "x", "a" => 1 };

        assert_eq!(projection.extract(&left), projection.extract(&right));
    }

    #[test]
    fn free_extract_matches_projection() {
        let t = tuple! { "a" => 1, "b" => 2 };

        for names in [&["a"][..], &["a", "b"][..]] {
            let list = fields(names);
            assert_eq!(
                extract(&t, &list),
                KeyProjection::new(list.clone()).extract(&t)
            );
        }
    }
}
