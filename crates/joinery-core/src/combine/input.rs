use crate::{
    mapping::ResolvedMapping,
    value::{Sequence, ShapeError, Value},
};

///
/// CombineInput
///
/// `groups[i]` feeds mapping `i`. A mapping with nested children expects a
/// nested input at its position; a flat mapping expects a plain sequence.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CombineInput {
    pub root: Sequence,
    pub groups: Vec<CombineGroup>,
}

///
/// CombineGroup
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CombineGroup {
    Flat(Sequence),
    Nested(CombineInput),
}

impl CombineInput {
    #[must_use]
    pub const fn new(root: Sequence, groups: Vec<CombineGroup>) -> Self {
        Self { root, groups }
    }

    /// Root rows with no candidate groups.
    #[must_use]
    pub const fn flat(root: Sequence) -> Self {
        Self::new(root, Vec::new())
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<CombineGroup>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Decode the nested-list form `[root, [group, ...]]`, guided by the
    /// mapping tree.
    ///
    /// Decoding stops at an empty root: the groups below it are never
    /// inspected, so malformed candidates under an empty parent set are not
    /// an error. Groups beyond the number of mappings are dropped.
    pub fn from_value(value: Value, mappings: &[ResolvedMapping]) -> Result<Self, ShapeError> {
        let mut parts = value.into_list()?.into_iter();

        let root = match parts.next() {
            Some(root) => root.into_sequence_or_empty()?,
            None => Vec::new(),
        };
        if root.is_empty() {
            return Ok(Self::flat(root));
        }

        let groups = match parts.next() {
            None | Some(Value::Null) => Vec::new(),
            Some(groups) => groups.into_list()?,
        };

        let groups = groups
            .into_iter()
            .zip(mappings)
            .map(|(group, mapping)| CombineGroup::from_value(group, mapping))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(root, groups))
    }
}

impl CombineGroup {
    fn from_value(value: Value, mapping: &ResolvedMapping) -> Result<Self, ShapeError> {
        match &mapping.children {
            Some(children) if !is_flat_sequence(&value) => {
                CombineInput::from_value(value, children).map(Self::Nested)
            }
            _ => value.into_sequence_or_empty().map(Self::Flat),
        }
    }
}

// A list whose first item is a tuple is a table, not a `[root, groups]` pair.
fn is_flat_sequence(value: &Value) -> bool {
    matches!(value.as_list(), Some([Value::Tuple(_), ..]))
}

impl From<Sequence> for CombineGroup {
    fn from(sequence: Sequence) -> Self {
        Self::Flat(sequence)
    }
}

impl From<CombineInput> for CombineGroup {
    fn from(input: CombineInput) -> Self {
        Self::Nested(input)
    }
}
