//! Length-prefixed byte blob codec.

use std::fmt;

use crate::codec::{Endianness, Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::limits::MAX_BYTES_LEN;
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

/// Uninterpreted bytes behind a u32 length prefix.
#[derive(Debug, Clone, Default)]
pub struct SerialBytes {
    value: Vec<u8>,
    endianness: Endianness,
}

impl SerialBytes {
    /// Creates a codec holding `value`.
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            endianness: Endianness::Native,
        }
    }

    /// Creates an empty codec whose length prefix uses the given byte order.
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            value: Vec::new(),
            endianness,
        }
    }

    /// Returns the stored bytes.
    #[inline]
    pub fn get(&self) -> &[u8] {
        &self.value
    }

    /// Stores `value`.
    pub fn set(&mut self, value: impl Into<Vec<u8>>) {
        self.value = value.into();
    }

    /// Consumes the codec, returning the bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.value
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

impl PartialEq for SerialBytes {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for SerialBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl Codec for SerialBytes {
    fn type_name(&self) -> &'static str {
        "SerialBytes"
    }

    fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_prefixed(&self.value, self.endianness, MAX_BYTES_LEN, "bytes")
    }

    fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        let bytes = reader.read_prefixed(self.endianness, MAX_BYTES_LEN, "bytes")?;
        self.value = bytes.to_vec();
        Ok(())
    }

    fn get_value(&self) -> Option<Value> {
        Some(Value::Bytes(self.value.clone()))
    }

    fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
        self.set(value.into_bytes()?);
        Ok(())
    }
}

impl TryFrom<Value> for SerialBytes {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        construct_from(value)
    }
}

impl Serializable for SerialBytes {}

impl Field for SerialBytes {
    type Output<'a> = &'a [u8];

    fn read(&self) -> &[u8] {
        &self.value
    }
}

impl<V: Into<Vec<u8>>> Assign<V> for SerialBytes {
    fn assign(&mut self, value: V) -> Result<(), ValidationError> {
        self.set(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"adf432989ihadf".to_vec();
        let codec = SerialBytes::new(data.clone());
        let bytes = codec.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + data.len());
        let (decoded, end) = SerialBytes::from_bytes(&bytes, 0).unwrap();
        assert_eq!(decoded.get(), &data[..]);
        assert_eq!(end, bytes.len());
    }

    #[test]
    fn test_empty() {
        let bytes = SerialBytes::default().to_bytes().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert!(SerialBytes::from_bytes(&bytes, 0).unwrap().0.get().is_empty());
    }

    #[test]
    fn test_prefix_endianness() {
        let mut codec = SerialBytes::with_endianness(Endianness::Big);
        codec.set(vec![0xaa, 0xbb]);
        assert_eq!(codec.to_bytes().unwrap(), vec![0, 0, 0, 2, 0xaa, 0xbb]);
    }

    #[test]
    fn test_raw_values() {
        assert!(matches!(
            SerialBytes::try_from(Value::from("text")),
            Err(ValidationError::WrongKind { .. })
        ));
        assert_eq!(
            SerialBytes::try_from(Value::from(vec![1u8])).unwrap().get(),
            &[1]
        );
    }
}
