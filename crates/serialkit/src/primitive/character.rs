//! Single ASCII character codec.

use std::fmt;

use crate::codec::{Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

/// Largest accepted code point.
const MAX_ASCII: u32 = 127;

/// One ASCII character, 1 byte on the wire. Defaults to `'\0'`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialChar {
    value: char,
}

impl SerialChar {
    /// Creates a codec holding `value`.
    pub fn new(value: char) -> Result<Self, ValidationError> {
        let mut codec = Self::default();
        codec.set(value)?;
        Ok(codec)
    }

    /// Returns the stored character.
    #[inline]
    pub fn get(&self) -> char {
        self.value
    }

    /// Stores `value` if its code point is at most 127.
    pub fn set(&mut self, value: char) -> Result<(), ValidationError> {
        if value as u32 > MAX_ASCII {
            return Err(ValidationError::OutOfRange {
                value: value as u32 as i128,
                min: 0,
                max: MAX_ASCII as i128,
            });
        }
        self.value = value;
        Ok(())
    }

    /// Stores the only character of `value`.
    pub fn set_str(&mut self, value: &str) -> Result<(), ValidationError> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.set(c),
            _ => Err(ValidationError::NotSingleChar {
                len: value.chars().count(),
            }),
        }
    }
}

impl fmt::Display for SerialChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Codec for SerialChar {
    fn type_name(&self) -> &'static str {
        "SerialChar"
    }

    fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_byte(self.value as u8);
        Ok(())
    }

    fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        let byte = reader.read_byte("char")?;
        if !byte.is_ascii() {
            return Err(DecodeError::InvalidAscii { field: "char", byte });
        }
        self.value = byte as char;
        Ok(())
    }

    fn get_value(&self) -> Option<Value> {
        Some(Value::Char(self.value))
    }

    fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
        match value {
            Value::Char(c) => self.set(c),
            Value::Str(s) => self.set_str(&s),
            other => Err(other.wrong_kind("char")),
        }
    }
}

impl TryFrom<Value> for SerialChar {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        construct_from(value)
    }
}

impl Serializable for SerialChar {}

impl Field for SerialChar {
    type Output<'a> = char;

    fn read(&self) -> char {
        self.value
    }
}

impl Assign<char> for SerialChar {
    fn assign(&mut self, value: char) -> Result<(), ValidationError> {
        self.set(value)
    }
}

impl Assign<&str> for SerialChar {
    fn assign(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_boundary() {
        let codec = SerialChar::new('\u{7f}').unwrap();
        let bytes = codec.to_bytes().unwrap();
        assert_eq!(bytes, vec![127]);
        assert_eq!(SerialChar::from_bytes(&bytes, 0).unwrap().0.get(), '\u{7f}');

        let err = SerialChar::new('\u{80}').unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                value: 128,
                min: 0,
                max: 127
            }
        );
    }

    #[test]
    fn test_single_character_strings() {
        let mut codec = SerialChar::default();
        assert_eq!(codec.get(), '\0');
        codec.set_str("a").unwrap();
        assert_eq!(codec.get(), 'a');
        assert_eq!(
            codec.set_str("ab").unwrap_err(),
            ValidationError::NotSingleChar { len: 2 }
        );
        assert_eq!(
            codec.set_str("").unwrap_err(),
            ValidationError::NotSingleChar { len: 0 }
        );
        assert_eq!(codec.get(), 'a');
    }

    #[test]
    fn test_decode_rejects_high_bytes() {
        let mut codec = SerialChar::default();
        assert_eq!(
            codec.decode(&[0xc3], 0),
            Err(DecodeError::InvalidAscii {
                field: "char",
                byte: 0xc3
            })
        );
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(SerialChar::try_from(Value::from("z")).unwrap().get(), 'z');
        assert!(matches!(
            SerialChar::try_from(Value::Int(97)),
            Err(ValidationError::WrongKind { .. })
        ));
    }
}
