//! IEEE-754 floating point codecs: half (2 bytes), single (4), double (8).
//!
//! Values are held as `f64` already rounded to the codec's precision, so
//! `get()` returns exactly what a decode of the encoding would. A finite
//! value that would round to infinity is rejected; infinities and NaN are
//! stored as given.

use std::fmt;

use crate::codec::half::{f16_bits_to_f32, f64_to_f16_bits};
use crate::codec::{Endianness, Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

macro_rules! serial_float {
    (
        $(#[$meta:meta])* $name:ident,
        precision: $precision:literal,
        max: $max:expr,
        round: $round:expr,
        write: $write:expr,
        read: $read:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name {
            value: f64,
            endianness: Endianness,
        }

        impl $name {
            /// Largest finite value this precision holds.
            pub const MAX: f64 = $max;

            /// Creates a codec holding `value` rounded to this precision.
            pub fn new(value: f64) -> Result<Self, ValidationError> {
                let mut codec = Self::default();
                codec.set(value)?;
                Ok(codec)
            }

            /// Creates a zero-valued codec using the given byte order.
            pub fn with_endianness(endianness: Endianness) -> Self {
                Self { value: 0.0, endianness }
            }

            /// Returns the stored number.
            #[inline]
            pub fn get(&self) -> f64 {
                self.value
            }

            /// Stores `value` rounded to this precision.
            pub fn set(&mut self, value: f64) -> Result<(), ValidationError> {
                let round: fn(f64) -> f64 = $round;
                let rounded = round(value);
                if value.is_finite() && rounded.is_infinite() {
                    return Err(ValidationError::FloatOutOfRange {
                        precision: $precision,
                        value,
                        max: Self::MAX,
                    });
                }
                self.value = rounded;
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
                let write: fn(&mut Writer, f64, Endianness) = $write;
                write(writer, self.value, self.endianness);
                Ok(())
            }

            fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
                let read: fn(&mut Reader<'_>, Endianness) -> Result<f64, DecodeError> = $read;
                self.value = read(reader, self.endianness)?;
                Ok(())
            }

            fn get_value(&self) -> Option<Value> {
                Some(Value::Float(self.value))
            }

            fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
                self.set(value.into_float()?)
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
            type Output<'a> = f64;

            fn read(&self) -> f64 {
                self.value
            }
        }

        impl<V: Into<f64>> Assign<V> for $name {
            fn assign(&mut self, value: V) -> Result<(), ValidationError> {
                self.set(value.into())
            }
        }
    };
}

serial_float!(
    /// Half precision float, 2 bytes on the wire.
    SerialHalf,
    precision: "half",
    max: 65504.0,
    round: |v| f16_bits_to_f32(f64_to_f16_bits(v)) as f64,
    write: |w, v, e| w.write_fixed(f64_to_f16_bits(v), e),
    read: |r, e| Ok(f16_bits_to_f32(r.read_fixed(e, "f16")?) as f64),
);

serial_float!(
    /// Single precision float, 4 bytes on the wire.
    SerialFloat,
    precision: "single",
    max: f32::MAX as f64,
    round: |v| v as f32 as f64,
    write: |w, v, e| w.write_fixed(v as f32, e),
    read: |r, e| Ok(r.read_fixed::<f32>(e, "f32")? as f64),
);

serial_float!(
    /// Double precision float, 8 bytes on the wire.
    SerialDouble,
    precision: "double",
    max: f64::MAX,
    round: |v| v,
    write: |w, v, e| w.write_fixed(v, e),
    read: |r, e| r.read_fixed(e, "f64"),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serializable>(codec: &T) -> T {
        T::from_bytes(&codec.to_bytes().unwrap(), 0).unwrap().0
    }

    #[test]
    fn test_widths() {
        assert_eq!(SerialHalf::new(1.0).unwrap().to_bytes().unwrap().len(), 2);
        assert_eq!(SerialFloat::new(1.0).unwrap().to_bytes().unwrap().len(), 4);
        assert_eq!(SerialDouble::new(1.0).unwrap().to_bytes().unwrap().len(), 8);
    }

    #[test]
    fn test_roundtrip_exact() {
        for value in [0.0, 1.0, -1.0, 0.5, 65504.0, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(roundtrip(&SerialHalf::new(value).unwrap()).get(), value);
            assert_eq!(roundtrip(&SerialFloat::new(value).unwrap()).get(), value);
            assert_eq!(roundtrip(&SerialDouble::new(value).unwrap()).get(), value);
        }
        assert!(roundtrip(&SerialHalf::new(f64::NAN).unwrap()).get().is_nan());
    }

    #[test]
    fn test_rounded_on_set() {
        let half = SerialHalf::new(0.1).unwrap();
        assert_ne!(half.get(), 0.1);
        assert_eq!(roundtrip(&half).get(), half.get());

        let single = SerialFloat::new(0.1).unwrap();
        assert_eq!(single.get(), 0.1f32 as f64);
        assert_eq!(SerialDouble::new(0.1).unwrap().get(), 0.1);
    }

    #[test]
    fn test_half_rounds_once() {
        let half = SerialHalf::new(1.0 + 2f64.powi(-11) + 2f64.powi(-40)).unwrap();
        assert_eq!(half.get(), 1.0009765625);
        assert_eq!(roundtrip(&half).get(), 1.0009765625);
    }

    #[test]
    fn test_half_overflow() {
        let mut half = SerialHalf::new(65504.0).unwrap();
        // Rounds down onto the largest half.
        half.set(65519.0).unwrap();
        assert_eq!(half.get(), 65504.0);

        for value in [65520.0, 70000.0, -65520.0, 1e300] {
            assert_eq!(
                half.set(value),
                Err(ValidationError::FloatOutOfRange {
                    precision: "half",
                    value,
                    max: 65504.0
                })
            );
        }
        assert_eq!(half.get(), 65504.0);
    }

    #[test]
    fn test_single_overflow() {
        let mut single = SerialFloat::new(f32::MAX as f64).unwrap();
        assert_eq!(single.get(), f32::MAX as f64);
        assert!(matches!(
            single.set(1e39),
            Err(ValidationError::FloatOutOfRange { precision: "single", .. })
        ));
        assert!(SerialFloat::new(-1e300).is_err());
        assert_eq!(single.get(), f32::MAX as f64);

        assert!(matches!(
            Assign::assign(&mut single, 1e39),
            Err(ValidationError::FloatOutOfRange { .. })
        ));
        assert!(single.set_value(Value::Float(1e39)).is_err());
        assert_eq!(SerialDouble::new(1e300).unwrap().get(), 1e300);
    }

    #[test]
    fn test_big_endian_double() {
        let mut codec = SerialDouble::with_endianness(Endianness::Big);
        codec.set(1.0).unwrap();
        assert_eq!(codec.to_bytes().unwrap(), vec![0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(SerialFloat::try_from(Value::Int(4)).unwrap().get(), 4.0);
        assert_eq!(SerialDouble::try_from(Value::Float(2.5)).unwrap().get(), 2.5);
        assert!(matches!(
            SerialDouble::try_from(Value::from("2.5")),
            Err(ValidationError::WrongKind { .. })
        ));
        assert!(matches!(
            SerialHalf::try_from(Value::Float(1e6)),
            Err(ValidationError::FloatOutOfRange { .. })
        ));
    }
}
