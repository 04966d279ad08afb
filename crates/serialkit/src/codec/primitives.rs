//! Cursor types for reading and writing the serialkit wire format.
//!
//! Implements fixed-width numbers in a chosen byte order and the u32
//! length prefix shared by strings, byte blobs and lists.

use crate::codec::endian::{Endianness, FixedWidth};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_PREFIX_LEN;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self { data, pos: offset }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a fixed-width number in the given byte order.
    #[inline]
    pub fn read_fixed<T: FixedWidth>(
        &mut self,
        endian: Endianness,
        context: &'static str,
    ) -> Result<T, DecodeError> {
        let bytes = self.read_bytes(T::WIDTH, context)?;
        let bytes = T::Bytes::try_from(bytes).map_err(|_| DecodeError::UnexpectedEof { context })?;
        Ok(T::from_bytes_with(bytes, endian))
    }

    /// Reads a u32 length prefix and checks it against `max_len`.
    pub fn read_len(
        &mut self,
        endian: Endianness,
        max_len: usize,
        field: &'static str,
    ) -> Result<usize, DecodeError> {
        let len = self.read_fixed::<u32>(endian, field)? as usize;
        if len > max_len {
            return Err(DecodeError::LengthExceedsLimit {
                field,
                len,
                max: max_len,
            });
        }
        Ok(len)
    }

    /// Reads a length-prefixed byte payload.
    pub fn read_prefixed(
        &mut self,
        endian: Endianness,
        max_len: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        let len = self.read_len(endian, max_len, field)?;
        self.read_bytes(len, field)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a fixed-width number in the given byte order.
    #[inline]
    pub fn write_fixed<T: FixedWidth>(&mut self, value: T, endian: Endianness) {
        self.buf.extend_from_slice(value.to_bytes_with(endian).as_ref());
    }

    /// Writes a u32 length prefix, refusing lengths over `max_len`.
    ///
    /// Encoders pass the limit their decoder enforces, so anything written
    /// can be read back.
    pub fn write_len(
        &mut self,
        len: usize,
        endian: Endianness,
        max_len: usize,
        field: &'static str,
    ) -> Result<(), EncodeError> {
        let max = max_len.min(MAX_PREFIX_LEN);
        if len > max {
            return Err(EncodeError::LengthExceedsLimit { field, len, max });
        }
        self.write_fixed(len as u32, endian);
        Ok(())
    }

    /// Writes a length-prefixed byte payload.
    pub fn write_prefixed(
        &mut self,
        bytes: &[u8],
        endian: Endianness,
        max_len: usize,
        field: &'static str,
    ) -> Result<(), EncodeError> {
        self.write_len(bytes.len(), endian, max_len, field)?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_roundtrip() {
        for endian in [Endianness::Native, Endianness::Little, Endianness::Big] {
            let mut writer = Writer::new();
            writer.write_fixed(0xdead_beefu32, endian);
            writer.write_fixed(-5i16, endian);
            writer.write_fixed(1.5f64, endian);
            assert_eq!(writer.len(), 14);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_fixed::<u32>(endian, "test").unwrap(), 0xdead_beef);
            assert_eq!(reader.read_fixed::<i16>(endian, "test").unwrap(), -5);
            assert_eq!(reader.read_fixed::<f64>(endian, "test").unwrap(), 1.5);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_prefixed_roundtrip() {
        let mut writer = Writer::new();
        writer.write_prefixed(b"apple", Endianness::Little, 100, "test").unwrap();
        assert_eq!(writer.as_bytes(), &[5, 0, 0, 0, b'a', b'p', b'p', b'l', b'e']);

        let mut reader = Reader::new(writer.as_bytes());
        let payload = reader.read_prefixed(Endianness::Little, 100, "test").unwrap();
        assert_eq!(payload, b"apple");
        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn test_length_too_long() {
        let mut writer = Writer::new();
        writer.write_len(1000, Endianness::Big, 1000, "test").unwrap();
        writer.write_bytes(&[0u8; 1000]);

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_prefixed(Endianness::Big, 100, "test");
        assert!(matches!(
            result,
            Err(DecodeError::LengthExceedsLimit { max: 100, .. })
        ));
    }

    #[test]
    fn test_write_len_limit() {
        let mut writer = Writer::new();
        writer.write_len(100, Endianness::Little, 100, "test").unwrap();
        assert_eq!(
            writer.write_len(101, Endianness::Little, 100, "test"),
            Err(EncodeError::LengthExceedsLimit {
                field: "test",
                len: 101,
                max: 100
            })
        );
        assert_eq!(writer.len(), 4);

        assert!(writer.write_prefixed(&[0; 3], Endianness::Big, 2, "test").is_err());
        assert_eq!(writer.len(), 4);
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        let result = reader.read_bytes(10, "test");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));

        let mut reader = Reader::at(&data, 4);
        assert!(reader.read_fixed::<u16>(Endianness::Little, "test").is_err());
    }

    #[test]
    fn test_offset_past_end() {
        let data = [1u8, 2];
        let mut reader = Reader::at(&data, 10);
        assert!(reader.remaining().is_empty());
        assert_eq!(reader.remaining_len(), 0);
        assert!(reader.read_byte("test").is_err());
    }
}
