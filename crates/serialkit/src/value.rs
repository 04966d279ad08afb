//! Raw values accepted by codecs.
//!
//! A [`Value`] is an unwrapped primitive: the input of the fallible
//! construct-from conversion every codec implements, and the output of
//! by-name field access on composites and unions.

use std::fmt;

use crate::error::ValidationError;

/// Value kinds, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Char,
    Str,
    Bytes,
    List,
}

impl ValueKind {
    /// Returns the kind name.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Char => "char",
            ValueKind::Str => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::List => "list",
        }
    }
}

/// An unwrapped primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Any integer; wide enough for the full u64 and i64 ranges.
    Int(i128),
    Float(f64),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
}

impl Value {
    /// Builds a list value from anything convertible to values.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Char(_) => ValueKind::Char,
            Value::Str(_) => ValueKind::Str,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Builds the error for a value of the wrong kind.
    pub fn wrong_kind(&self, expected: &'static str) -> ValidationError {
        ValidationError::WrongKind {
            expected,
            found: self.kind().name(),
        }
    }

    /// Returns the integer, or a kind error.
    pub fn into_int(self) -> Result<i128, ValidationError> {
        match self {
            Value::Int(v) => Ok(v),
            other => Err(other.wrong_kind("integer")),
        }
    }

    /// Returns the number as a float. Integers are accepted.
    pub fn into_float(self) -> Result<f64, ValidationError> {
        match self {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(other.wrong_kind("float")),
        }
    }

    /// Returns the text. A single character counts as text.
    pub fn into_string(self) -> Result<String, ValidationError> {
        match self {
            Value::Str(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            other => Err(other.wrong_kind("string")),
        }
    }

    /// Returns the bytes, or a kind error.
    pub fn into_bytes(self) -> Result<Vec<u8>, ValidationError> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.wrong_kind("bytes")),
        }
    }

    /// Returns the list items, or a kind error.
    pub fn into_list(self) -> Result<Vec<Value>, ValidationError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.wrong_kind("list")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "{:?}", b),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, isize, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(3u16), Value::Int(3));
        assert_eq!(Value::from(u64::MAX), Value::Int(u64::MAX as i128));
        assert_eq!(Value::from("hello"), Value::Str("hello".to_string()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
        assert_eq!(
            Value::list([1, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_kind_errors() {
        let err = Value::from("hello").into_int().unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongKind {
                expected: "integer",
                found: "string"
            }
        );
        assert_eq!(Value::Int(2).into_float().unwrap(), 2.0);
        assert_eq!(Value::Char('x').into_string().unwrap(), "x");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::list(["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Value::Int(-4).to_string(), "-4");
    }
}
