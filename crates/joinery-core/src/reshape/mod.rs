//! Single-level structural transforms.
//!
//! Absent fields are never an error here; only a value of the wrong kind
//! where a tuple or list is required raises a [`ShapeError`](crate::value::ShapeError).

mod group;
mod nest;
mod split;


// re-exports
pub use group::{group, ungroup};
pub use nest::{UnwrapOptions, fold, fold_in_place, nest, nest_in_place, unwrap, unwrap_in_place};
pub use split::split;
