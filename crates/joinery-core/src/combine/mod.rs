//! Hierarchical hash-join.
//!
//! Attaches child rows to parent rows by key equality, recursively over a
//! mapping tree. Every parent row is kept, in input order, and each mapped
//! field always holds a list (empty when nothing matched).

mod index;
mod input;


use crate::{
    mapping::{MappingError, MappingSpec, ResolvedMapping, prepare_mappings},
    obs::{CombineStats, TraceEvent, TraceSink},
    value::{Sequence, Value},
};
use std::{collections::HashMap, fmt, sync::Arc};

// re-exports
pub use index::GroupIndex;
pub use input::{CombineGroup, CombineInput};

///
/// Combiner
///
/// Stateless between calls. Index caches and counters live for exactly one
/// `execute` call.
///

#[derive(Clone, Default)]
pub struct Combiner {
    debug: bool,
    trace: Option<Arc<dyn TraceSink>>,
}

impl Combiner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Arc<dyn TraceSink>) -> Self {
        self.trace = Some(trace);
        self
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    fn emit(&self, event: TraceEvent<'_>) {
        if let Some(trace) = &self.trace {
            trace.on_event(event);
        }
    }

    #[must_use]
    pub fn execute(&self, input: CombineInput, mappings: &[ResolvedMapping]) -> Sequence {
        self.execute_with_stats(input, mappings).0
    }

    #[must_use]
    pub fn execute_with_stats(
        &self,
        input: CombineInput,
        mappings: &[ResolvedMapping],
    ) -> (Sequence, CombineStats) {
        let mut stats = CombineStats::default();
        let rows = self.combine_level(input, mappings, 0, &mut stats);

        self.debug_log(format!(
            "combine finished: {} rows, {} indexes built, {} reused, {} rows attached",
            rows.len(),
            stats.indexes_built,
            stats.indexes_reused,
            stats.rows_attached,
        ));

        (rows, stats)
    }

    fn combine_level(
        &self,
        input: CombineInput,
        mappings: &[ResolvedMapping],
        depth: usize,
        stats: &mut CombineStats,
    ) -> Sequence {
        let CombineInput { root, groups } = input;
        stats.record_level();

        self.emit(TraceEvent::CombineStart {
            depth,
            parents: root.len(),
            mappings: mappings.len(),
        });

        // Nothing to attach to; candidates below are never evaluated.
        if root.is_empty() {
            self.debug_log(format!("combine depth={depth}: empty root, skipping groups"));
            self.emit(TraceEvent::CombineFinish { depth, rows: 0 });
            return root;
        }

        self.debug_log(format!(
            "combine depth={depth}: {} parents, {} mappings, {} groups",
            root.len(),
            mappings.len(),
            groups.len(),
        ));

        // field -> child key fields -> index
        let mut cache: HashMap<&str, HashMap<&[String], GroupIndex>> = HashMap::new();
        let mut active: Vec<&ResolvedMapping> = Vec::with_capacity(mappings.len());

        for (mapping, group) in mappings.iter().zip(groups) {
            active.push(mapping);

            let child_fields = mapping.child_key.fields();
            let slot = cache.entry(mapping.field.as_str()).or_default();
            if slot.contains_key(child_fields) {
                stats.record_reuse();
                self.emit(TraceEvent::IndexReused {
                    depth,
                    field: &mapping.field,
                });
                self.debug_log(format!(
                    "combine depth={depth}: reusing index for '{}'",
                    mapping.field
                ));
                continue;
            }

            let candidates = self.candidates(group, mapping, depth, stats);
            let index = GroupIndex::build(candidates, &mapping.child_key);

            stats.record_build();
            self.emit(TraceEvent::IndexBuilt {
                depth,
                field: &mapping.field,
                candidates: index.candidate_count(),
                keys: index.key_count(),
            });
            self.debug_log(format!(
                "combine depth={depth}: indexed '{}' ({} candidates, {} keys)",
                mapping.field,
                index.candidate_count(),
                index.key_count(),
            ));

            slot.insert(child_fields, index);
        }

        let rows: Sequence = root
            .into_iter()
            .map(|mut parent| {
                // Keys come from the parent as given, before any attachment.
                let keys: Vec<_> = active
                    .iter()
                    .map(|mapping| mapping.parent_key.extract(&parent))
                    .collect();

                for (mapping, key) in active.iter().zip(keys) {
                    let matched = cache
                        .get(mapping.field.as_str())
                        .and_then(|slot| slot.get(mapping.child_key.fields()))
                        .map(|index| index.matching(&key))
                        .unwrap_or_default();

                    stats.record_attached(matched.len());
                    parent.insert(mapping.field.clone(), Value::from_sequence(matched));
                }

                parent
            })
            .collect();

        self.emit(TraceEvent::CombineFinish {
            depth,
            rows: rows.len(),
        });

        rows
    }

    // Resolve the candidate rows for one mapping, combining nested levels
    // first so grandchildren are attached before indexing.
    fn candidates(
        &self,
        group: CombineGroup,
        mapping: &ResolvedMapping,
        depth: usize,
        stats: &mut CombineStats,
    ) -> Sequence {
        match (group, mapping.children.as_deref()) {
            (CombineGroup::Nested(inner), Some(children)) => {
                self.combine_level(inner, children, depth + 1, stats)
            }
            (CombineGroup::Nested(inner), None) => inner.root,
            (CombineGroup::Flat(rows), Some(children)) => {
                self.combine_level(CombineInput::flat(rows), children, depth + 1, stats)
            }
            (CombineGroup::Flat(rows), None) => rows,
        }
    }
}

impl fmt::Debug for Combiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combiner")
            .field("debug", &self.debug)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

/// Validate `mappings` and join `input` with a default combiner.
pub fn combine(input: CombineInput, mappings: &[MappingSpec]) -> Result<Sequence, MappingError> {
    let resolved = prepare_mappings(mappings)?;

    Ok(combine_resolved(input, &resolved))
}

#[must_use]
pub fn combine_resolved(input: CombineInput, mappings: &[ResolvedMapping]) -> Sequence {
    Combiner::new().execute(input, mappings)
}
