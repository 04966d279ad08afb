//! Enumeration codec.
//!
//! [`SerialEnum<E>`] stores one member of a closed Rust enum and writes it
//! as the u32 position of the member in declaration order. Declare the enum
//! with [`serial_enumerable!`](crate::serial_enumerable):
//!
//! ```rust
//! use serialkit::{serial_enumerable, Codec, SerialEnum, Serializable};
//!
//! serial_enumerable! {
//!     pub enum Fruit { Apple, Banana, Cherry }
//! }
//!
//! let codec = SerialEnum::new(Fruit::Cherry);
//! let bytes = codec.to_bytes().unwrap();
//! assert_eq!(bytes.len(), 4);
//! let (decoded, _) = SerialEnum::<Fruit>::from_bytes(&bytes, 0).unwrap();
//! assert_eq!(decoded.get(), Fruit::Cherry);
//! ```

use std::fmt;

use log::debug;

use crate::codec::{Endianness, Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::serial::{construct_from, Assign, Codec, Field, Serializable};
use crate::value::Value;

/// A closed set of members with a stable declaration order.
pub trait SerialEnumerable: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Name of the enum.
    const NAME: &'static str;

    /// All members in declaration order; never empty.
    const MEMBERS: &'static [Self];

    /// Name of this member.
    fn name(&self) -> &'static str;

    /// Position of this member in [`MEMBERS`](Self::MEMBERS).
    fn position(&self) -> usize {
        Self::MEMBERS.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Looks a member up by name.
    fn from_name(name: &str) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.name() == name)
    }
}

/// Declares an enum usable with [`SerialEnum`].
///
/// At least one member is required; the first one is the default.
#[macro_export]
macro_rules! serial_enumerable {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $member:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $member ),+
        }

        impl $crate::enumeration::SerialEnumerable for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [Self] = &[$( $name::$member ),+];

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$member => stringify!($member) ),+
                }
            }
        }
    };
}

/// One member of `E`, encoded as a u32 index.
#[derive(Debug, Clone, Copy)]
pub struct SerialEnum<E> {
    value: E,
    endianness: Endianness,
}

impl<E: SerialEnumerable> SerialEnum<E> {
    /// Creates a codec holding `value`.
    pub fn new(value: E) -> Self {
        Self {
            value,
            endianness: Endianness::Native,
        }
    }

    /// Creates a codec holding the first member, using the given byte order.
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            value: E::MEMBERS[0],
            endianness,
        }
    }

    /// Returns the stored member.
    #[inline]
    pub fn get(&self) -> E {
        self.value
    }

    /// Stores `value`.
    pub fn set(&mut self, value: E) {
        self.value = value;
    }

    /// Stores the member called `name`.
    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.value = E::from_name(name).ok_or_else(|| ValidationError::UnknownMember {
            enumeration: E::NAME,
            member: name.to_string(),
        })?;
        Ok(())
    }

    /// Returns the byte order of the index.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Changes the byte order of the index.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }
}

impl<E: SerialEnumerable> Default for SerialEnum<E> {
    fn default() -> Self {
        Self::with_endianness(Endianness::Native)
    }
}

impl<E: SerialEnumerable> PartialEq for SerialEnum<E> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<E: SerialEnumerable> fmt::Display for SerialEnum<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", E::NAME, self.value.name())
    }
}

impl<E: SerialEnumerable> Codec for SerialEnum<E> {
    fn type_name(&self) -> &'static str {
        E::NAME
    }

    fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.write_fixed(self.value.position() as u32, self.endianness);
        Ok(())
    }

    fn load_in_place(&mut self, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
        let index = reader.read_fixed::<u32>(self.endianness, "enum index")?;
        match E::MEMBERS.get(index as usize) {
            Some(member) => {
                self.value = *member;
                Ok(())
            }
            None => {
                debug!("rejecting {} index {}", E::NAME, index);
                Err(DecodeError::DiscriminantOutOfRange {
                    schema: E::NAME,
                    index: index as u64,
                    count: E::MEMBERS.len(),
                })
            }
        }
    }

    fn get_value(&self) -> Option<Value> {
        Some(Value::Str(self.value.name().to_string()))
    }

    fn set_value(&mut self, value: Value) -> Result<(), ValidationError> {
        match value {
            Value::Str(name) => self.set_name(&name),
            other => Err(other.wrong_kind(E::NAME)),
        }
    }
}

impl<E: SerialEnumerable> TryFrom<Value> for SerialEnum<E> {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        construct_from(value)
    }
}

impl<E: SerialEnumerable> Serializable for SerialEnum<E> {}

impl<E: SerialEnumerable> Field for SerialEnum<E> {
    type Output<'a> = E;

    fn read(&self) -> E {
        self.value
    }
}

impl<E: SerialEnumerable> Assign<E> for SerialEnum<E> {
    fn assign(&mut self, value: E) -> Result<(), ValidationError> {
        self.set(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    serial_enumerable! {
        enum TestEnum {
            A,
            B,
            /// Third member.
            C,
            D,
        }
    }

    #[test]
    fn test_default() {
        let codec = SerialEnum::<TestEnum>::default();
        let (decoded, _) = SerialEnum::<TestEnum>::from_bytes(&codec.to_bytes().unwrap(), 0).unwrap();
        assert_eq!(decoded.get(), TestEnum::A);
    }

    #[test]
    fn test_change() {
        let codec = SerialEnum::new(TestEnum::C);
        let bytes = codec.to_bytes().unwrap();
        assert_eq!(bytes, 2u32.to_ne_bytes().to_vec());
        let (decoded, _) = SerialEnum::<TestEnum>::from_bytes(&bytes, 0).unwrap();
        assert_eq!(decoded.get(), TestEnum::C);
        assert_eq!(decoded.to_string(), "TestEnum.C");
    }

    #[test]
    fn test_incorrect() {
        assert!(matches!(
            SerialEnum::<TestEnum>::try_from(Value::Int(0)),
            Err(ValidationError::WrongKind { .. })
        ));
        assert_eq!(
            SerialEnum::<TestEnum>::try_from(Value::from("E")).unwrap_err(),
            ValidationError::UnknownMember {
                enumeration: "TestEnum",
                member: "E".to_string()
            }
        );
        assert_eq!(
            SerialEnum::<TestEnum>::try_from(Value::from("D")).unwrap().get(),
            TestEnum::D
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let bytes = 4u32.to_ne_bytes();
        assert_eq!(
            SerialEnum::<TestEnum>::from_bytes(&bytes, 0).unwrap_err(),
            DecodeError::DiscriminantOutOfRange {
                schema: "TestEnum",
                index: 4,
                count: 4
            }
        );
    }
}
