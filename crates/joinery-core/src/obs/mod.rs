//! Observability boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! transform semantics.

mod trace;

pub use trace::{CombineStats, TraceEvent, TraceSink};
