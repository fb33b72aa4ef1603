//! Core runtime for Joinery: the dynamic value model, reshape primitives,
//! the tree join, recursive traversal, and the named function registry.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod combine;
pub mod error;
pub mod function;
pub mod key;
pub mod mapping;
pub mod obs;
pub mod recursion;
pub mod registry;
pub mod reshape;
pub mod transform;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

// re-exports
pub use error::{ErrorClass, TransformError};

///
/// Prelude
///
/// Prelude contains the vocabulary needed to build and run pipelines.
/// Executors and per-module error types stay in their modules.
///

pub mod prelude {
    pub use crate::{
        combine::{CombineGroup, CombineInput, Combiner, combine},
        function::Function,
        mapping::MappingSpec,
        registry::{Arg, Registry},
        value::{Sequence, Tuple, Value},
    };
}
