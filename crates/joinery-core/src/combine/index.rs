use crate::{
    key::{JoinKey, KeyProjection},
    value::{Sequence, Tuple},
};
use std::collections::HashMap;

///
/// GroupIndex
///
/// Multi-map from a projected join key to every candidate sharing it.
/// Candidates keep their input order inside each bucket. Built once per
/// combine call and read-only afterwards.
///

#[derive(Debug, Default)]
pub struct GroupIndex {
    buckets: HashMap<JoinKey, Sequence>,
    candidates: usize,
}

impl GroupIndex {
    #[must_use]
    pub fn build(candidates: Sequence, projection: &KeyProjection) -> Self {
        let count = candidates.len();
        let mut buckets: HashMap<JoinKey, Sequence> = HashMap::new();
        for candidate in candidates {
            buckets
                .entry(projection.extract(&candidate))
                .or_default()
                .push(candidate);
        }

        Self {
            buckets,
            candidates: count,
        }
    }

    #[must_use]
    pub fn get(&self, key: &JoinKey) -> Option<&[Tuple]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Owned copy of the matching bucket; no match is an empty sequence.
    #[must_use]
    pub fn matching(&self, key: &JoinKey) -> Sequence {
        self.get(key).map(<[Tuple]>::to_vec).unwrap_or_default()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of indexed candidates.
    #[must_use]
    pub const fn candidate_count(&self) -> usize {
        self.candidates
    }
}
