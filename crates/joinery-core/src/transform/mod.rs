//! General-purpose array and tuple helpers that sit beside the reshape
//! primitives in pipelines.

pub mod array;
pub mod tuple;

// re-exports
pub use array::{add_keys, extract_key, insert_key, map_array, wrap};
pub use tuple::{
    accept_keys, accept_keys_in_place, map_keys, map_value, map_values, reject_keys,
    reject_keys_in_place, rename_keys, rename_keys_in_place,
};
