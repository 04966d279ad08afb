//! Length-prefixed string codecs.
//!
//! The wire form is a u32 byte length followed by the encoded text. The
//! target encoding is fixed per codec type: [`SerialString`] writes UTF-8,
//! [`SerialAsciiString`] accepts only ASCII and rejects anything else at
//! `set` time.

use std::fmt;
use std::marker::PhantomData;

use crate::codec::{Endianness, Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::limits::MAX_STRING_LEN;
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

/// A text encoding a string codec is bound to.
pub trait TextEncoding: fmt::Debug + Clone + Copy + Default + Send + Sync + 'static {
    /// Name of the codec type using this encoding.
    const CODEC_NAME: &'static str;

    /// Checks that every character of `text` can be encoded.
    fn check(text: &str) -> Result<(), ValidationError>;

    /// Validates a decoded payload and returns it as text.
    fn decode(bytes: &[u8]) -> Result<&str, DecodeError>;
}

/// UTF-8; every string is encodable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl TextEncoding for Utf8 {
    const CODEC_NAME: &'static str = "SerialString";

    fn check(_text: &str) -> Result<(), ValidationError> {
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<&str, DecodeError> {
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field: "string" })
    }
}

/// 7-bit ASCII.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascii;

impl TextEncoding for Ascii {
    const CODEC_NAME: &'static str = "SerialAsciiString";

    fn check(text: &str) -> Result<(), ValidationError> {
        match text.chars().find(|c| !c.is_ascii()) {
            Some(ch) => Err(ValidationError::Unencodable {
                encoding: "ascii",
                ch,
            }),
            None => Ok(()),
        }
    }

    fn decode(bytes: &[u8]) -> Result<&str, DecodeError> {
        if let Some(&byte) = bytes.iter().find(|b| !b.is_ascii()) {
            return Err(DecodeError::InvalidAscii {
                field: "ascii string",
                byte,
            });
        }
        // ASCII is valid UTF-8.
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
            field: "ascii string",
        })
    }
}

/// A string codec bound to the encoding `E`.
#[derive(Debug, Clone, Default)]
pub struct SerialText<E: TextEncoding> {
    value: String,
    endianness: Endianness,
    _encoding: PhantomData<E>,
}

/// UTF-8 string.
pub type SerialString = SerialText<Utf8>;

/// ASCII-only string.
pub type SerialAsciiString = SerialText<Ascii>;

impl<E: TextEncoding> SerialText<E> {
    /// Creates a codec holding `value`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let mut codec = Self::default();
        codec.set(value)?;
        Ok(codec)
    }

    /// Creates an empty codec whose length prefix uses the given byte order.
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            value: String::new(),
            endianness,
            _encoding: PhantomData,
        }
    }

    /// Returns the stored text.
    #[inline]
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Stores `value` if it can be encoded.
    pub fn set(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        E::check(&value)?;
        self.value = value;
        Ok(())
    }

    /// Returns the byte order of the length prefix.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Changes the byte order of the length prefix.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }
}

impl<E: TextEncoding> PartialEq for SerialText<E> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<E: TextEncoding> fmt::Display for SerialText<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<E: TextEncoding> Codec for SerialText<E> {
    fn type_name(&self) -> &'static str {
        E::CODEC_NAME
    }

    fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_prefixed(
            self.value.as_bytes(),
            self.endianness,
            MAX_STRING_LEN,
            "string",
        )
    }

    fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        let bytes = reader.read_prefixed(self.endianness, MAX_STRING_LEN, "string")?;
        self.value = E::decode(bytes)?.to_string();
        Ok(())
    }

    fn get_value(&self) -> Option<Value> {
        Some(Value::Str(self.value.clone()))
    }

    fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
        self.set(value.into_string()?)
    }
}

impl<E: TextEncoding> TryFrom<Value> for SerialText<E> {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        construct_from(value)
    }
}

impl<E: TextEncoding> Serializable for SerialText<E> {}

impl<E: TextEncoding> Field for SerialText<E> {
    type Output<'a> = &'a str;

    fn read(&self) -> &str {
        &self.value
    }
}

impl<E: TextEncoding, V: Into<String>> Assign<V> for SerialText<E> {
    fn assign(&mut self, value: V) -> Result<(), ValidationError> {
        self.set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<E: TextEncoding>(text: &str) -> String {
        let codec = SerialText::<E>::new(text).unwrap();
        let bytes = codec.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + text.len());
        let (decoded, end) = SerialText::<E>::from_bytes(&bytes, 0).unwrap();
        assert_eq!(end, bytes.len());
        decoded.get().to_string()
    }

    #[test]
    fn test_unicode() {
        let text = "a\u{0e55}\u{0e57}a";
        assert_eq!(roundtrip::<Utf8>(text), text);
        assert_eq!(
            SerialAsciiString::new(text).unwrap_err(),
            ValidationError::Unencodable {
                encoding: "ascii",
                ch: '\u{0e55}'
            }
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(roundtrip::<Utf8>(""), "");
        assert_eq!(roundtrip::<Ascii>(""), "");
        assert_eq!(SerialString::default().to_bytes().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_printable_ascii() {
        let text: String = (0x21u8..0x7f).map(char::from).collect();
        assert_eq!(roundtrip::<Utf8>(&text), text);
        assert_eq!(roundtrip::<Ascii>(&text), text);
    }

    #[test]
    fn test_long() {
        let text = "abc".repeat(10000);
        assert_eq!(roundtrip::<Utf8>(&text), text);
        assert_eq!(roundtrip::<Ascii>(&text), text);
    }

    #[test]
    fn test_ascii_reads_as_utf8() {
        let ascii = SerialAsciiString::new("apple").unwrap();
        let (decoded, _) = SerialString::from_bytes(&ascii.to_bytes().unwrap(), 0).unwrap();
        assert_eq!(decoded.get(), "apple");
    }

    #[test]
    fn test_decode_validation() {
        let mut bytes = SerialString::new("h\u{e9}").unwrap().to_bytes().unwrap();
        assert!(matches!(
            SerialAsciiString::from_bytes(&bytes, 0),
            Err(DecodeError::InvalidAscii { .. })
        ));

        let last = bytes.len() - 1;
        bytes[last] = 0xff;
        assert_eq!(
            SerialString::from_bytes(&bytes, 0).unwrap_err(),
            DecodeError::InvalidUtf8 { field: "string" }
        );
    }

    #[test]
    fn test_truncated_payload() {
        let mut codec = SerialString::with_endianness(Endianness::Big);
        let result = codec.decode(&[0, 0, 0, 5, b'a', b'b'], 0);
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
    }
}
