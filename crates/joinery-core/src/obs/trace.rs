///
/// TraceSink
///

pub trait TraceSink: Send + Sync {
    fn on_event(&self, event: TraceEvent<'_>);
}

///
/// TraceEvent
///
/// `depth` is the mapping-tree level, 0 for the root call.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceEvent<'a> {
    CombineStart {
        depth: usize,
        parents: usize,
        mappings: usize,
    },
    IndexBuilt {
        depth: usize,
        field: &'a str,
        candidates: usize,
        keys: usize,
    },
    IndexReused {
        depth: usize,
        field: &'a str,
    },
    CombineFinish {
        depth: usize,
        rows: usize,
    },
}

///
/// CombineStats
///
/// Per-call counters; never shared across calls.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CombineStats {
    pub levels: u64,
    pub indexes_built: u64,
    pub indexes_reused: u64,
    pub rows_attached: u64,
}

impl CombineStats {
    pub(crate) const fn record_level(&mut self) {
        self.levels = self.levels.saturating_add(1);
    }

    pub(crate) const fn record_build(&mut self) {
        self.indexes_built = self.indexes_built.saturating_add(1);
    }

    pub(crate) const fn record_reuse(&mut self) {
        self.indexes_reused = self.indexes_reused.saturating_add(1);
    }

    pub(crate) const fn record_attached(&mut self, rows: usize) {
        self.rows_attached = self.rows_attached.saturating_add(rows as u64);
    }
}
