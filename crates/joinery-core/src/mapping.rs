//! Join mapping specifications.
//!
//! A mapping names the child field to attach, the parent → child key
//! correspondence, and optionally the mappings that join grandchildren onto
//! the child rows first.

use crate::{
    key::KeyProjection,
    value::{Tuple, Value},
};
use thiserror::Error as ThisError;

///
/// MappingError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MappingError {
    #[error("mapping '{field}' has no join keys")]
    EmptyKeys { field: String },

    #[error("mapping '{field}' uses parent key '{key}' more than once")]
    DuplicateParentKey { field: String, key: String },

    #[error("mapping '{field}' uses child key '{key}' more than once")]
    DuplicateChildKey { field: String, key: String },

    #[error("malformed mapping at {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl MappingError {
    fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

///
/// MappingSpec
///
/// `keys` is the ordered parent → child correspondence.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MappingSpec {
    pub field: String,
    pub keys: Vec<(String, String)>,
    pub children: Option<Vec<Self>>,
}

impl MappingSpec {
    pub fn new<P, C>(field: impl Into<String>, keys: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        Self {
            field: field.into(),
            keys: keys
                .into_iter()
                .map(|(parent, child)| (parent.into(), child.into()))
                .collect(),
            children: None,
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = Some(children);
        self
    }

    #[must_use]
    pub fn parent_fields(&self) -> Vec<String> {
        self.keys.iter().map(|(parent, _)| parent.clone()).collect()
    }

    #[must_use]
    pub fn child_fields(&self) -> Vec<String> {
        self.keys.iter().map(|(_, child)| child.clone()).collect()
    }

    /// Check this mapping (not its children) for key invariants.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.keys.is_empty() {
            return Err(MappingError::EmptyKeys {
                field: self.field.clone(),
            });
        }

        for (i, (parent, child)) in self.keys.iter().enumerate() {
            let earlier = &self.keys[..i];
            if earlier.iter().any(|(p, _)| p == parent) {
                return Err(MappingError::DuplicateParentKey {
                    field: self.field.clone(),
                    key: parent.clone(),
                });
            }
            if earlier.iter().any(|(_, c)| c == child) {
                return Err(MappingError::DuplicateChildKey {
                    field: self.field.clone(),
                    key: child.clone(),
                });
            }
        }

        Ok(())
    }

    ///
    /// VALUE FORM
    ///
    /// `[field, {parent: child, ...}, [nested...]?]`, the nested-list shape
    /// registry arguments use.
    ///

    pub fn list_from_value(value: &Value) -> Result<Vec<Self>, MappingError> {
        Self::list_from_value_at(value, "mappings")
    }

    pub fn from_value(value: &Value) -> Result<Self, MappingError> {
        Self::from_value_at(value, "mapping")
    }

    fn list_from_value_at(value: &Value, path: &str) -> Result<Vec<Self>, MappingError> {
        let items = value.as_list().ok_or_else(|| {
            MappingError::malformed(path, format!("expected list, found {}", value.kind()))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::from_value_at(item, &format!("{path}[{i}]")))
            .collect()
    }

    fn from_value_at(value: &Value, path: &str) -> Result<Self, MappingError> {
        let parts = value.as_list().ok_or_else(|| {
            MappingError::malformed(path, format!("expected list, found {}", value.kind()))
        })?;

        let (field, keys, children) = match parts {
            [field, keys] => (field, keys, None),
            [field, keys, children] => (field, keys, Some(children)),
            _ => {
                return Err(MappingError::malformed(
                    path,
                    format!("expected 2 or 3 parts, found {}", parts.len()),
                ));
            }
        };

        let field = field
            .as_text()
            .ok_or_else(|| MappingError::malformed(path, "field name must be text"))?;
        let keys = keys
            .as_tuple()
            .ok_or_else(|| MappingError::malformed(path, "key correspondence must be a tuple"))?;

        let mut spec = Self::new(field, Self::keys_from_tuple(keys, path)?);
        spec.children = match children {
            None | Some(Value::Null) => None,
            Some(children) => Some(Self::list_from_value_at(
                children,
                &format!("{path}.children"),
            )?),
        };

        Ok(spec)
    }

    fn keys_from_tuple(keys: &Tuple, path: &str) -> Result<Vec<(String, String)>, MappingError> {
        keys.iter()
            .map(|(parent, child)| {
                child
                    .as_text()
                    .map(|child| (parent.to_string(), child.to_string()))
                    .ok_or_else(|| {
                        MappingError::malformed(
                            path,
                            format!("child key for '{parent}' must be text"),
                        )
                    })
            })
            .collect()
    }
}

///
/// ResolvedMapping
///
/// A validated mapping with its key extractors chosen.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedMapping {
    pub field: String,
    pub parent_key: KeyProjection,
    pub child_key: KeyProjection,
    pub children: Option<Vec<Self>>,
}

impl ResolvedMapping {
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.children.is_some()
    }
}

/// Validate every mapping in the tree and pick Single/Composite extractors.
pub fn prepare_mappings(raw: &[MappingSpec]) -> Result<Vec<ResolvedMapping>, MappingError> {
    raw.iter()
        .map(|spec| {
            spec.validate()?;

            let children = spec
                .children
                .as_deref()
                .map(prepare_mappings)
                .transpose()?;

            Ok(ResolvedMapping {
                field: spec.field.clone(),
                parent_key: KeyProjection::new(spec.parent_fields()),
                child_key: KeyProjection::new(spec.child_fields()),
                children,
            })
        })
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::value;
    use serde_json::json;

    #[test]
    fn single_pair_resolves_to_single_projection() {
        let resolved = prepare_mappings(&[MappingSpec::new("tasks", [("name", "user")])])
            .expect("valid mapping");

        assert_eq!(resolved[0].parent_key, KeyProjection::Single("name".into()));
        assert_eq!(resolved[0].child_key, KeyProjection::Single("user".into()));
        assert!(!resolved[0].has_children());
    }

    #[test]
    fn multiple_pairs_resolve_to_composite_projection() {
        let spec = MappingSpec::new("tasks", [("name", "user"), ("email", "user_email")]);
        let resolved = prepare_mappings(&[spec]).expect("valid mapping");

        assert_eq!(
            resolved[0].child_key,
            KeyProjection::Composite(vec!["user".into(), "user_email".into()])
        );
    }

    #[test]
    fn nested_children_resolve_recursively() {
        let spec = MappingSpec::new("tasks", [("name", "user")])
            .with_children(vec![MappingSpec::new("tags", [("title", "task")])]);
        let resolved = prepare_mappings(&[spec]).expect("valid mapping");

        let children = resolved[0].children.as_ref().expect("children resolved");
        assert_eq!(children[0].field, "tags");
        assert_eq!(children[0].parent_key, KeyProjection::Single("title".into()));
    }

    #[test]
    fn empty_keys_are_rejected() {
        let spec = MappingSpec::new("tasks", Vec::<(String, String)>::new());
        let err = prepare_mappings(&[spec]).expect_err("empty keys should fail");

        assert_eq!(
            err,
            MappingError::EmptyKeys {
                field: "tasks".into()
            }
        );
    }

    #[test]
    fn reused_child_key_is_rejected() {
        let spec = MappingSpec::new("tasks", [("a", "x"), ("b", "x")]);
        let err = prepare_mappings(&[spec]).expect_err("reused child key should fail");

        assert!(matches!(err, MappingError::DuplicateChildKey { key, .. } if key == "x"));
    }

    #[test]
    fn invalid_nested_mapping_is_rejected() {
        let spec = MappingSpec::new("tasks", [("name", "user")]).with_children(vec![
            MappingSpec::new("tags", Vec::<(String, String)>::new()),
        ]);

        assert!(prepare_mappings(&[spec]).is_err());
    }

    #[test]
    fn parses_nested_list_form() {
        let raw = value(json!([
            ["tasks", { "name": "user" }, [["tags", { "title": "task" }]]],
            ["notes", { "id": "owner_id", "org": "org_id" }]
        ]));

        let specs = MappingSpec::list_from_value(&raw).expect("mappings should parse");

        assert_eq!(
            specs,
            vec![
                MappingSpec::new("tasks", [("name", "user")])
                    .with_children(vec![MappingSpec::new("tags", [("title", "task")])]),
                MappingSpec::new("notes", [("id", "owner_id"), ("org", "org_id")]),
            ]
        );
    }

    #[test]
    fn null_children_read_as_none() {
        let raw = value(json!(["tasks", { "name": "user" }, null]));
        let spec = MappingSpec::from_value(&raw).expect("mapping should parse");

        assert_eq!(spec.children, None);
    }

    #[test]
    fn malformed_value_reports_path() {
        let raw = value(json!([["tasks", { "name": "user" }, [["tags", "title"]]]]));
        let err = MappingSpec::list_from_value(&raw).expect_err("malformed nested keys");

        assert_eq!(
            err,
            MappingError::Malformed {
                path: "mappings[0].children[0]".into(),
                reason: "key correspondence must be a tuple".into(),
            }
        );
    }
}
