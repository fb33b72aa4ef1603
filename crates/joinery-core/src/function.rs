use crate::{error::TransformError, value::Value};
use std::{fmt, ops::Shr, sync::Arc};

///
/// Callable
///

pub type Callable = dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync;

///
/// Function
///
/// A named data transform with its constructor arguments already bound.
/// Cheap to clone; composed functions keep the name of every stage.
///

#[derive(Clone)]
pub struct Function {
    names: Vec<String>,
    callable: Arc<Callable>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self {
            names: vec![name.into()],
            callable: Arc::new(f),
        }
    }

    /// Stage names joined with ` >> `.
    #[must_use]
    pub fn name(&self) -> String {
        self.names.join(" >> ")
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Apply the function.
    ///
    /// Shape failures come back as `MalformedInput` naming the failing
    /// function and the value it rejected.
    pub fn call(&self, value: Value) -> Result<Value, TransformError> {
        (self.callable)(value).map_err(|err| err.within(&self.name()))
    }

    /// Run `self`, then feed its output to `next`.
    #[must_use]
    pub fn compose(self, next: Self) -> Self {
        let mut names = self.names.clone();
        names.extend(next.names.iter().cloned());

        Self {
            names,
            callable: Arc::new(move |value| next.call(self.call(value)?)),
        }
    }
}

impl Shr for Function {
    type Output = Self;

    fn shr(self, next: Self) -> Self {
        self.compose(next)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
