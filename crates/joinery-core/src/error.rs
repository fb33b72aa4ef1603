use crate::{
    mapping::MappingError,
    registry::ArgumentError,
    value::{ShapeError, Value},
};
use derive_more::Display;
use joinery_config::ConfigError;
use thiserror::Error as ThisError;

///
/// TransformError
///
/// Public failure surface of the toolkit.
///
/// Absent fields, empty sequences, and unmatched join keys are never errors;
/// everything here aborts the whole pipeline call.
///

#[derive(Debug, ThisError)]
pub enum TransformError {
    #[error("no registered function '{name}' in {registry}")]
    FunctionNotFound { name: String, registry: String },

    #[error("function '{name}' already registered in {registry}")]
    FunctionAlreadyRegistered { name: String, registry: String },

    #[error("invalid arguments for '{function}': {source}")]
    InvalidArguments {
        function: String,
        source: ArgumentError,
    },

    #[error("failed to call function {function} with {value:?} - {source}")]
    MalformedInput {
        function: String,
        value: Box<Value>,
        source: ShapeError,
    },

    #[error("recursion depth limit {limit} exceeded")]
    DepthLimitExceeded { limit: usize },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TransformError {
    /// Attach the calling function's name to a shape failure.
    ///
    /// Other failures already carry their own context and pass through.
    #[must_use]
    pub fn within(self, function: &str) -> Self {
        match self {
            Self::Shape(source) => Self::MalformedInput {
                function: function.to_string(),
                value: Box::new(source.found().clone()),
                source,
            },
            other => other,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::FunctionNotFound { .. } => ErrorClass::NotFound,
            Self::FunctionAlreadyRegistered { .. } => ErrorClass::Conflict,
            Self::InvalidArguments { .. }
            | Self::MalformedInput { .. }
            | Self::Shape(_)
            | Self::Mapping(_)
            | Self::Config(_) => ErrorClass::InvalidInput,
            Self::DepthLimitExceeded { .. } => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FunctionNotFound { .. })
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Coarse error taxonomy for callers that route on failure kind.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    #[display("not_found")]
    NotFound,
    #[display("conflict")]
    Conflict,
    #[display("invalid_input")]
    InvalidInput,
    #[display("unsupported")]
    Unsupported,
}
