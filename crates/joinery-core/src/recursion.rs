//! Recursive application of a transform over nested containers.
//!
//! The transform runs on a container first; its result is then walked and
//! every nested container the guard admits is transformed the same way.
//! Traversal uses an explicit frame stack, so depth is bounded by memory
//! (or by `max_depth`), never by the call stack.

use crate::{
    error::TransformError,
    value::{ShapeError, Tuple, Value, ValueKind},
};

///
/// Guard
///
/// Which nested values the walk descends into.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Guard {
    /// Lists and tuples.
    #[default]
    Any,
    List,
    Tuple,
}

impl Guard {
    const fn admits(self, value: &Value) -> bool {
        match self {
            Self::Any => value.is_container(),
            Self::List => matches!(value, Value::List(_)),
            Self::Tuple => matches!(value, Value::Tuple(_)),
        }
    }

    const fn expected(self) -> Option<ValueKind> {
        match self {
            Self::Any => None,
            Self::List => Some(ValueKind::List),
            Self::Tuple => Some(ValueKind::Tuple),
        }
    }
}

///
/// Recursion
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Recursion {
    guard: Guard,
    max_depth: Option<usize>,
}

impl Recursion {
    #[must_use]
    pub const fn new(guard: Guard) -> Self {
        Self {
            guard,
            max_depth: None,
        }
    }

    /// Fail with `DepthLimitExceeded` past `limit` nested containers.
    #[must_use]
    pub const fn with_max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    #[must_use]
    pub const fn guard(&self) -> Guard {
        self.guard
    }

    pub fn apply<F>(&self, value: Value, mut f: F) -> Result<Value, TransformError>
    where
        F: FnMut(Value) -> Result<Value, TransformError>,
    {
        let root = self.visit(value, &mut f)?;
        let mut stack = match Frame::open(root, self.guard) {
            Ok(frame) => vec![frame],
            Err(leaf) => return Ok(leaf),
        };
        self.check_depth(stack.len())?;

        let mut output = Value::Null;
        while let Some(top) = stack.last_mut() {
            let Some(child) = top.next_child() else {
                let finished = stack.pop().map_or(Value::Null, Frame::finish);
                match stack.last_mut() {
                    Some(parent) => parent.accept(finished),
                    None => output = finished,
                }
                continue;
            };

            if !self.guard.admits(&child) {
                top.accept(child);
                continue;
            }

            match Frame::open(self.visit(child, &mut f)?, self.guard) {
                Ok(frame) => {
                    self.check_depth(stack.len() + 1)?;
                    stack.push(frame);
                }
                Err(leaf) => top.accept(leaf),
            }
        }

        Ok(output)
    }

    // Run `f` and hold the result to the guard's container kind.
    fn visit<F>(&self, value: Value, f: &mut F) -> Result<Value, TransformError>
    where
        F: FnMut(Value) -> Result<Value, TransformError>,
    {
        let out = f(value)?;
        match self.guard.expected() {
            Some(kind) if out.kind() != kind => Err(ShapeError::mismatch(kind, out).into()),
            _ => Ok(out),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), TransformError> {
        match self.max_depth {
            Some(limit) if depth > limit => Err(TransformError::DepthLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}

///
/// Frame
///
/// One partially rebuilt container. Children are pulled from `pending` and
/// pushed back into `done` once fully processed.
///

enum Frame {
    List {
        done: Vec<Value>,
        pending: std::vec::IntoIter<Value>,
    },
    Tuple {
        done: Tuple,
        pending: std::vec::IntoIter<(String, Value)>,
        key: Option<String>,
    },
}

impl Frame {
    fn open(value: Value, guard: Guard) -> Result<Self, Value> {
        if !guard.admits(&value) {
            return Err(value);
        }

        match value {
            Value::List(items) => Ok(Self::List {
                done: Vec::with_capacity(items.len()),
                pending: items.into_iter(),
            }),
            Value::Tuple(tuple) => Ok(Self::Tuple {
                done: Tuple::with_capacity(tuple.len()),
                pending: tuple.into_iter(),
                key: None,
            }),
            other => Err(other),
        }
    }

    fn next_child(&mut self) -> Option<Value> {
        match self {
            Self::List { pending, .. } => pending.next(),
            Self::Tuple { pending, key, .. } => pending.next().map(|(k, v)| {
                *key = Some(k);
                v
            }),
        }
    }

    fn accept(&mut self, value: Value) {
        match self {
            Self::List { done, .. } => done.push(value),
            Self::Tuple { done, key, .. } => {
                if let Some(key) = key.take() {
                    done.insert(key, value);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::List { done, .. } => Value::List(done),
            Self::Tuple { done, .. } => Value::Tuple(done),
        }
    }
}

/// Transform every nested list and tuple, outermost first.
pub fn recursion<F>(value: Value, f: F) -> Result<Value, TransformError>
where
    F: FnMut(Value) -> Result<Value, TransformError>,
{
    Recursion::new(Guard::Any).apply(value, f)
}

/// Like [`recursion`], restricted to lists; the input must be a list.
pub fn list_recursion<F>(value: Value, f: F) -> Result<Value, TransformError>
where
    F: FnMut(Value) -> Result<Value, TransformError>,
{
    Recursion::new(Guard::List).apply(value, f)
}

/// Like [`recursion`], restricted to tuples; the input must be a tuple.
pub fn tuple_recursion<F>(value: Value, f: F) -> Result<Value, TransformError>
where
    F: FnMut(Value) -> Result<Value, TransformError>,
{
    Recursion::new(Guard::Tuple).apply(value, f)
}

///
/// TESTS
///
