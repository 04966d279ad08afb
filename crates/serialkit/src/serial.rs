//! The codec protocol.
//!
//! [`Codec`] is the object-safe core: write to a [`Writer`], load in place
//! from a [`Reader`], and optionally expose the unwrapped value. Composites,
//! unions and lists drive their members through it.
//!
//! [`Serializable`] adds construction: every serializable type has a
//! default, can be decoded into a fresh instance, and can be built from a
//! raw [`Value`].
//!
//! [`Field`] and [`Assign`] are the typed unwrap/wrap views used by the
//! accessors that `serial_composite!` and `serial_union!` generate.

use std::fmt;

use crate::codec::{Reader, Writer};
use crate::error::{DecodeError, EncodeError, Error, ValidationError};
use crate::value::Value;

/// A value holder with a byte encoding.
pub trait Codec: fmt::Debug + fmt::Display {
    /// Name of the codec type, used in error messages and schemas.
    fn type_name(&self) -> &'static str;

    /// Appends the encoding of the current value.
    fn write(&self, writer: &mut Writer) -> Result<(), EncodeError>;

    /// Replaces the current value with one decoded from the reader.
    ///
    /// On error the value is left as it was; the reader position is then
    /// unspecified.
    fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError>;

    /// Returns the unwrapped value, or `None` if the codec has no get
    /// capability (aggregates are accessed as themselves).
    fn get_value(&self) -> Option<Value> {
        None
    }

    /// Validates and stores a raw value.
    ///
    /// Codecs without a set capability reject every value with
    /// [`ValidationError::ReadOnly`].
    fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
        let _ = value;
        Err(ValidationError::ReadOnly {
            name: self.type_name(),
        })
    }

    /// Encodes the current value.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new();
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decodes in place starting at `offset` and returns the offset just
    /// past the consumed bytes.
    fn decode(&mut self, data: &[u8], offset: usize) -> Result<usize, DecodeError> {
        let mut reader = Reader::at(data, offset);
        self.load_in_place(&mut reader)?;
        Ok(reader.position())
    }
}

/// A codec that can be constructed: by default, from bytes, or from a raw
/// value.
pub trait Serializable:
    Codec + Default + Clone + PartialEq + TryFrom<Value, Error = ValidationError> + 'static
{
    /// Whether [`Codec::set_value`] can store a raw value. Aggregates have
    /// no raw form and set this to `false`.
    const SETTABLE: bool = true;

    /// Decodes a new instance starting at `offset`; returns it with the
    /// offset just past the consumed bytes.
    fn from_bytes(data: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
        let mut value = Self::default();
        let end = value.decode(data, offset)?;
        Ok((value, end))
    }

    /// Builds a new instance by decoding this one's encoding.
    ///
    /// Codec configuration such as byte order is kept; every value is the
    /// one that survives the wire.
    fn copy(&self) -> Result<Self, Error> {
        let bytes = self.to_bytes()?;
        let mut copy = self.clone();
        copy.decode(&bytes, 0)?;
        Ok(copy)
    }
}

/// Typed read access to a codec's value.
pub trait Field: Serializable {
    /// What a getter returns: the unwrapped value for primitives, a
    /// reference for containers and aggregates.
    type Output<'a>
    where
        Self: 'a;

    /// Reads the current value.
    fn read(&self) -> Self::Output<'_>;
}

/// Typed write access to a codec's value.
pub trait Assign<V>: Serializable {
    /// Validates `value` and stores it; the codec is unchanged on error.
    fn assign(&mut self, value: V) -> Result<(), ValidationError>;
}

/// Builds a codec from a raw value by setting it on a default instance.
pub(crate) fn construct_from<T: Codec + Default>(value: Value) -> Result<T, ValidationError> {
    let mut codec = T::default();
    codec.set_value(value)?;
    Ok(codec)
}
