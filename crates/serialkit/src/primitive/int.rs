//! Fixed-width integer codecs.
//!
//! Each codec stores one integer of its width, checked against the closed
//! range of the width on every `set`, and writes it in two's complement
//! using its configured byte order.

use std::fmt;

use crate::codec::{Endianness, Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

macro_rules! serial_int {
    ($(#[$meta:meta])* $name:ident, $native:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name {
            value: $native,
            endianness: Endianness,
        }

        impl $name {
            /// Smallest accepted value.
            pub const MIN: i128 = <$native>::MIN as i128;
            /// Largest accepted value.
            pub const MAX: i128 = <$native>::MAX as i128;

            /// Creates a codec holding `value`, checking the range.
            pub fn new(value: impl Into<i128>) -> Result<Self, ValidationError> {
                let mut codec = Self::default();
                codec.set(value)?;
                Ok(codec)
            }

            /// Creates a zero-valued codec using the given byte order.
            pub fn with_endianness(endianness: Endianness) -> Self {
                Self { value: 0, endianness }
            }

            /// Returns the stored integer.
            #[inline]
            pub fn get(&self) -> $native {
                self.value
            }

            /// Stores `value` if it lies within `[MIN, MAX]`.
            pub fn set(&mut self, value: impl Into<i128>) -> Result<(), ValidationError> {
                let value = value.into();
                self.value = <$native>::try_from(value).map_err(|_| ValidationError::OutOfRange {
                    value,
                    min: Self::MIN,
                    max: Self::MAX,
                })?;
                Ok(())
            }

            /// Returns the byte order used on the wire.
            pub fn endianness(&self) -> Endianness {
                self.endianness
            }

            /// Changes the byte order used on the wire.
            pub fn set_endianness(&mut self, endianness: Endianness) {
                self.endianness = endianness;
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl From<$native> for $name {
            fn from(value: $native) -> Self {
                Self {
                    value,
                    endianness: Endianness::Native,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl Codec for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
                writer.write_fixed(self.value, self.endianness);
                Ok(())
            }

            fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
                self.value = reader.read_fixed(self.endianness, stringify!($native))?;
                Ok(())
            }

            fn get_value(&self) -> Option<Value> {
                Some(Value::Int(self.value as i128))
            }

            fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
                self.set(value.into_int()?)
            }
        }

        impl TryFrom<Value> for $name {
            type Error = ValidationError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                construct_from(value)
            }
        }

        impl Serializable for $name {}

        impl Field for $name {
            type Output<'a> = $native;

            fn read(&self) -> $native {
                self.value
            }
        }

        impl<V: Into<i128>> Assign<V> for $name {
            fn assign(&mut self, value: V) -> Result<(), ValidationError> {
                self.set(value)
            }
        }
    };
}

serial_int!(
    /// Unsigned 8-bit integer, range [0, 255].
    SerialU8, u8
);
serial_int!(
    /// Unsigned 16-bit integer, range [0, 65535].
    SerialU16, u16
);
serial_int!(
    /// Unsigned 32-bit integer, range [0, 2^32 - 1].
    SerialU32, u32
);
serial_int!(
    /// Unsigned 64-bit integer, range [0, 2^64 - 1].
    SerialU64, u64
);
serial_int!(
    /// Signed 8-bit integer, range [-128, 127].
    SerialS8, i8
);
serial_int!(
    /// Signed 16-bit integer, range [-32768, 32767].
    SerialS16, i16
);
serial_int!(
    /// Signed 32-bit integer, range [-2^31, 2^31 - 1].
    SerialS32, i32
);
serial_int!(
    /// Signed 64-bit integer, range [-2^63, 2^63 - 1].
    SerialS64, i64
);
