//! Named function registry.
//!
//! A registry maps names to constructors. `fetch` binds constructor arguments
//! and returns a ready-to-call [`Function`]. Names are never shadowed: a
//! second registration under the same name is rejected.

mod args;
mod builtins;


use crate::{error::TransformError, function::Function, value::Value};
use joinery_config::ToolkitConfig;
use std::{collections::HashMap, fmt, sync::Arc};

// re-exports
pub use args::{Arg, ArgumentError, Args};

///
/// Constructor
///

pub type Constructor =
    Arc<dyn Fn(&mut Args, &ToolkitConfig) -> Result<Function, ArgumentError> + Send + Sync>;

///
/// Registry
///

#[derive(Clone)]
pub struct Registry {
    label: String,
    config: ToolkitConfig,
    entries: HashMap<String, Constructor>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            config: ToolkitConfig::default(),
            entries: HashMap::new(),
        }
    }

    /// Registry pre-loaded with every built-in transform.
    #[must_use]
    pub fn core() -> Self {
        let mut registry = Self::new("core");
        for (name, constructor) in builtins::all() {
            registry.entries.insert(name.to_string(), constructor);
        }

        registry
    }

    /// Config handed to every constructor on `fetch`.
    #[must_use]
    pub const fn with_config(mut self, config: ToolkitConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn config(&self) -> ToolkitConfig {
        self.config
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Register a constructor under `name`.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        constructor: F,
    ) -> Result<(), TransformError>
    where
        F: Fn(&mut Args, &ToolkitConfig) -> Result<Function, ArgumentError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(self.already_registered(name));
        }

        self.entries.insert(name, Arc::new(constructor));
        Ok(())
    }

    /// Register a transform that takes no constructor arguments.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Result<(), TransformError>
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        let name = name.into();
        let f = Arc::new(f);
        let label = name.clone();

        self.register(name, move |_, _| {
            let f = Arc::clone(&f);
            Ok(Function::new(label.clone(), move |value| f(value)))
        })
    }

    /// Copy every entry of `other` into this registry.
    ///
    /// Nothing is copied if any name collides.
    pub fn import(&mut self, other: &Self) -> Result<(), TransformError> {
        if let Some(name) = other.entries.keys().find(|name| self.contains(name)) {
            return Err(self.already_registered(name.clone()));
        }

        self.entries.extend(
            other
                .entries
                .iter()
                .map(|(name, constructor)| (name.clone(), Arc::clone(constructor))),
        );

        Ok(())
    }

    /// Resolve `name` and bind `args`.
    pub fn fetch(&self, name: &str, args: Vec<Arg>) -> Result<Function, TransformError> {
        let constructor = self
            .entries
            .get(name)
            .ok_or_else(|| TransformError::FunctionNotFound {
                name: name.to_string(),
                registry: self.label.clone(),
            })?;

        let mut args = Args::new(args);
        constructor(&mut args, &self.config)
            .and_then(|function| args.finish().map(|()| function))
            .map_err(|source| TransformError::InvalidArguments {
                function: name.to_string(),
                source,
            })
    }

    fn already_registered(&self, name: String) -> TransformError {
        TransformError::FunctionAlreadyRegistered {
            name,
            registry: self.label.clone(),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("label", &self.label)
            .field("config", &self.config)
            .field("names", &self.names())
            .finish()
    }
}
