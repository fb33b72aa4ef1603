mod float;
mod tuple;
mod wire;

#[cfg(test)]
mod tests;

use derive_more::Display;
use thiserror::Error as ThisError;

// re-exports
pub use float::Float64;
pub use tuple::Tuple;

///
/// Sequence
/// an ordered table of tuples
///

pub type Sequence = Vec<Tuple>;

///
/// ValueKind
///
/// Structural kind of a value, used by guards and shape diagnostics.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValueKind {
    #[display("null")]
    Null,
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("uint")]
    Uint,
    #[display("float")]
    Float,
    #[display("text")]
    Text,
    #[display("list")]
    List,
    #[display("tuple")]
    Tuple,
}

impl ValueKind {
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Tuple)
    }
}

///
/// ShapeError
///
/// A value had the wrong structural kind for the operation applied to it.
/// Carries the offending value so callers can report it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ShapeError {
    #[error("expected {expected}, found {}", .found.kind())]
    Mismatch {
        expected: ValueKind,
        found: Box<Value>,
    },

    #[error("expected {expected} at index {index}, found {}", .found.kind())]
    Element {
        index: usize,
        expected: ValueKind,
        found: Box<Value>,
    },
}

impl ShapeError {
    #[must_use]
    pub fn mismatch(expected: ValueKind, found: Value) -> Self {
        Self::Mismatch {
            expected,
            found: Box::new(found),
        }
    }

    #[must_use]
    pub fn element(index: usize, expected: ValueKind, found: Value) -> Self {
        Self::Element {
            index,
            expected,
            found: Box::new(found),
        }
    }

    /// The value that failed the shape check.
    #[must_use]
    pub fn found(&self) -> &Value {
        match self {
            Self::Mismatch { found, .. } | Self::Element { found, .. } => found,
        }
    }

    #[must_use]
    pub fn into_found(self) -> Value {
        match self {
            Self::Mismatch { found, .. } | Self::Element { found, .. } => *found,
        }
    }
}

///
/// Value
///
/// Null   → absent/nil; a legitimate, matchable join key.
/// List   → ordered values (a Sequence when every item is a Tuple).
/// Tuple  → ordered key → value record.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(Float64),
    Text(String),
    List(Vec<Self>),
    Tuple(Tuple),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::List` of tuples.
    #[must_use]
    pub fn from_sequence(sequence: Sequence) -> Self {
        Self::List(sequence.into_iter().map(Self::Tuple).collect())
    }

    /// Build a `Value::List` of text values, the shape used for field lists.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        Self::List(
            fields
                .iter()
                .map(|f| Self::Text(f.as_ref().to_string()))
                .collect(),
        )
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Tuple(_) => ValueKind::Tuple,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_tuple(&self) -> Option<&Tuple> {
        if let Self::Tuple(t) = self {
            Some(t)
        } else {
            None
        }
    }

    pub fn into_text(self) -> Result<String, ShapeError> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(ShapeError::mismatch(ValueKind::Text, other)),
        }
    }

    pub fn into_list(self) -> Result<Vec<Self>, ShapeError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(ShapeError::mismatch(ValueKind::List, other)),
        }
    }

    pub fn into_tuple(self) -> Result<Tuple, ShapeError> {
        match self {
            Self::Tuple(t) => Ok(t),
            other => Err(ShapeError::mismatch(ValueKind::Tuple, other)),
        }
    }

    /// Convert a list of tuples into a sequence.
    pub fn into_sequence(self) -> Result<Sequence, ShapeError> {
        self.into_list()?
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Self::Tuple(t) => Ok(t),
                other => Err(ShapeError::element(index, ValueKind::Tuple, other)),
            })
            .collect()
    }

    /// Like [`into_sequence`](Self::into_sequence), but `Null` reads as an empty table.
    pub fn into_sequence_or_empty(self) -> Result<Sequence, ShapeError> {
        match self {
            Self::Null => Ok(Vec::new()),
            other => other.into_sequence(),
        }
    }
}

// Local helper to expand scalar conversions.
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool    => Bool,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    u8      => Int,
    u16     => Int,
    u32     => Int,
    u64     => Uint,
    Float64 => Float,
    &str    => Text,
    String  => Text,
    Tuple   => Tuple,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Self::from_sequence(sequence)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}
