//! ## Crate layout
//! - `config`: toolkit configuration parsed from TOML.
//! - `core`: value model, reshape primitives, tree join, recursion, and the
//!   named function registry.
//!
//! The `prelude` module mirrors what pipeline code usually needs.

pub use joinery_config as config;
pub use joinery_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Errors
//

pub use joinery_core::{ErrorClass, TransformError as Error};

///
/// registry_from_toml
///
/// Core registry configured from a TOML document.
///

pub fn registry_from_toml(source: &str) -> Result<crate::core::registry::Registry, Error> {
    let config = config::ToolkitConfig::from_toml_str(source)?;

    Ok(crate::core::registry::Registry::core().with_config(config))
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::ToolkitConfig,
        core::{prelude::*, tuple},
    };
}
