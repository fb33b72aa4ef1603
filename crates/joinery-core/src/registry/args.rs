use crate::{
    function::Function,
    mapping::{MappingError, MappingSpec},
    value::{ShapeError, Tuple, Value},
};
use thiserror::Error as ThisError;

///
/// ArgumentError
///

#[derive(Debug, ThisError)]
pub enum ArgumentError {
    #[error("missing argument {index}, expected {expected}")]
    Missing {
        index: usize,
        expected: &'static str,
    },

    #[error("argument {index} should be {expected}, found {found}")]
    Unexpected {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("expected {expected} arguments, found {found}")]
    TooMany { expected: usize, found: usize },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

///
/// Arg
///
/// One constructor argument: plain data or another function.
///

#[derive(Clone, Debug)]
pub enum Arg {
    Value(Value),
    Function(Function),
}

impl Arg {
    /// A list of field names.
    pub fn fields<S: AsRef<str>>(fields: &[S]) -> Self {
        Self::Value(Value::from_fields(fields))
    }

    fn label(&self) -> String {
        match self {
            Self::Value(value) => value.kind().to_string(),
            Self::Function(_) => "function".to_string(),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Function> for Arg {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Self::Value(Value::from(text))
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Self::Value(Value::from(text))
    }
}

impl From<Tuple> for Arg {
    fn from(tuple: Tuple) -> Self {
        Self::Value(Value::Tuple(tuple))
    }
}

///
/// Args
///
/// Positional reader over constructor arguments. Constructors pull what they
/// need in order; the registry rejects anything left over.
///

#[derive(Debug)]
pub struct Args {
    items: std::vec::IntoIter<Arg>,
    len: usize,
    index: usize,
}

impl Args {
    #[must_use]
    pub fn new(items: Vec<Arg>) -> Self {
        Self {
            len: items.len(),
            items: items.into_iter(),
            index: 0,
        }
    }

    fn next(&mut self) -> Option<(usize, Arg)> {
        let arg = self.items.next()?;
        let index = self.index;
        self.index += 1;

        Some((index, arg))
    }

    fn required(&mut self, expected: &'static str) -> Result<(usize, Arg), ArgumentError> {
        self.next().ok_or(ArgumentError::Missing {
            index: self.index,
            expected,
        })
    }

    const fn unexpected(index: usize, expected: &'static str, found: String) -> ArgumentError {
        ArgumentError::Unexpected {
            index,
            expected,
            found,
        }
    }

    pub fn value(&mut self) -> Result<Value, ArgumentError> {
        match self.required("value")? {
            (_, Arg::Value(value)) => Ok(value),
            (index, other) => Err(Self::unexpected(index, "value", other.label())),
        }
    }

    /// Next value, with an exhausted list or `Null` reading as `None`.
    pub fn optional_value(&mut self) -> Result<Option<Value>, ArgumentError> {
        match self.next() {
            None | Some((_, Arg::Value(Value::Null))) => Ok(None),
            Some((_, Arg::Value(value))) => Ok(Some(value)),
            Some((index, other)) => Err(Self::unexpected(index, "value", other.label())),
        }
    }

    pub fn text(&mut self) -> Result<String, ArgumentError> {
        match self.required("text")? {
            (_, Arg::Value(Value::Text(text))) => Ok(text),
            (index, other) => Err(Self::unexpected(index, "text", other.label())),
        }
    }

    /// A list of field names; a single text value counts as a one-item list.
    pub fn fields(&mut self) -> Result<Vec<String>, ArgumentError> {
        let (index, arg) = self.required("field list")?;
        Self::fields_from(index, arg)
    }

    pub fn optional_fields(&mut self) -> Result<Option<Vec<String>>, ArgumentError> {
        match self.next() {
            None | Some((_, Arg::Value(Value::Null))) => Ok(None),
            Some((index, arg)) => Self::fields_from(index, arg).map(Some),
        }
    }

    fn fields_from(index: usize, arg: Arg) -> Result<Vec<String>, ArgumentError> {
        match arg {
            Arg::Value(Value::Text(field)) => Ok(vec![field]),
            Arg::Value(Value::List(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Text(field) => Ok(field),
                    other => Err(Self::unexpected(
                        index,
                        "field list",
                        format!("list containing {}", other.kind()),
                    )),
                })
                .collect(),
            other => Err(Self::unexpected(index, "field list", other.label())),
        }
    }

    pub fn tuple(&mut self) -> Result<Tuple, ArgumentError> {
        match self.required("tuple")? {
            (_, Arg::Value(Value::Tuple(tuple))) => Ok(tuple),
            (index, other) => Err(Self::unexpected(index, "tuple", other.label())),
        }
    }

    pub fn optional_tuple(&mut self) -> Result<Option<Tuple>, ArgumentError> {
        match self.next() {
            None | Some((_, Arg::Value(Value::Null))) => Ok(None),
            Some((_, Arg::Value(Value::Tuple(tuple)))) => Ok(Some(tuple)),
            Some((index, other)) => Err(Self::unexpected(index, "tuple", other.label())),
        }
    }

    /// A `{from: to}` tuple read as ordered text pairs.
    pub fn key_pairs(&mut self) -> Result<Vec<(String, String)>, ArgumentError> {
        let index = self.index;
        self.tuple()?
            .into_iter()
            .map(|(from, to)| match to {
                Value::Text(to) => Ok((from, to)),
                other => Err(Self::unexpected(
                    index,
                    "tuple of text",
                    format!("{} at '{from}'", other.kind()),
                )),
            })
            .collect()
    }

    pub fn function(&mut self) -> Result<Function, ArgumentError> {
        match self.required("function")? {
            (_, Arg::Function(function)) => Ok(function),
            (index, other) => Err(Self::unexpected(index, "function", other.label())),
        }
    }

    /// Mapping specifications in their nested-list value form.
    pub fn mappings(&mut self) -> Result<Vec<MappingSpec>, ArgumentError> {
        let value = self.value()?;

        Ok(MappingSpec::list_from_value(&value)?)
    }

    /// Fail if any argument was not consumed.
    pub const fn finish(&self) -> Result<(), ArgumentError> {
        if self.index < self.len {
            return Err(ArgumentError::TooMany {
                expected: self.index,
                found: self.len,
            });
        }

        Ok(())
    }
}
