//! Composite engine: ordered records of named codecs.
//!
//! A composite is declared with [`serial_composite!`](crate::serial_composite).
//! Each entry names a field, optionally a typed setter, and the codec type
//! that holds it. The wire form is the concatenation of the fields in declared
//! order with no framing; fields of an `extends` base come first.
//!
//! ```rust
//! use serialkit::{serial_composite, Codec, Serializable, SerialString, SerialU16, SerialU32};
//!
//! serial_composite! {
//!     /// Two numbers with typed setters and a label set through its codec.
//!     pub struct Record {
//!         a / set_a: SerialU16,
//!         b / set_b: SerialU32,
//!         c: SerialString,
//!     }
//! }
//!
//! let mut record = Record::new();
//! record.set_a(4u16).unwrap();
//! record.set_b(5u32).unwrap();
//! record.c.set("hello").unwrap();
//!
//! let bytes = record.to_bytes().unwrap();
//! assert_eq!(bytes.len(), 15);
//! let (decoded, _) = Record::from_bytes(&bytes, 0).unwrap();
//! assert_eq!(decoded.a(), 4);
//! assert_eq!(decoded.c(), "hello");
//! ```

use std::any::Any;
use std::fmt;

use crate::error::ValidationError;
use crate::schema::{CompositeSchema, FieldDescriptor};
use crate::serial::{Codec, Serializable};
use crate::value::Value;

/// Dynamic access to the fields of a declared composite.
///
/// Implemented by [`serial_composite!`](crate::serial_composite); the typed
/// accessors it generates are the usual way in. The methods here address
/// fields by name and move raw [`Value`]s.
pub trait Composite: Serializable {
    /// The field list, built once.
    fn schema() -> &'static CompositeSchema;

    /// Field codecs in wire order, base fields first.
    fn fields(&self) -> Vec<&dyn Codec>;

    /// Mutable field codecs in wire order, base fields first.
    fn fields_mut(&mut self) -> Vec<&mut dyn Codec>;

    /// Returns the codec of the field called `name`.
    fn field(&self, name: &str) -> Result<&dyn Codec, ValidationError>;

    /// Returns the codec of the field called `name` for in-place changes.
    fn field_mut(&mut self, name: &str) -> Result<&mut dyn Codec, ValidationError>;

    /// Reads the unwrapped value of a field; `None` for aggregate fields,
    /// which are reached through [`field`](Self::field) instead.
    fn get_field(&self, name: &str) -> Result<Option<Value>, ValidationError> {
        Ok(self.field(name)?.get_value())
    }

    /// Assigns a raw value to a field through its codec's validation.
    ///
    /// Fails with [`ValidationError::ReadOnly`] when the field's codec has no
    /// raw form, as for nested composites and unions.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ValidationError> {
        let schema = Self::schema();
        let descriptor = &schema.fields()[schema.require(name)?];
        if !descriptor.settable {
            return Err(ValidationError::ReadOnly {
                name: descriptor.name,
            });
        }
        self.field_mut(name)?.set_value(value)
    }

    /// Copies every field of `other` into `self`.
    fn set(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Copies every field of `other` if it is the same composite type.
    fn set_dyn(&mut self, other: &dyn Any) -> Result<(), ValidationError> {
        match other.downcast_ref::<Self>() {
            Some(other) => {
                self.set(other);
                Ok(())
            }
            None => Err(ValidationError::SchemaMismatch {
                expected: Self::schema().name(),
            }),
        }
    }
}

#[doc(hidden)]
pub fn unknown_field<C: Composite>(name: &str) -> ValidationError {
    ValidationError::UnknownField {
        schema: C::schema().name(),
        field: name.to_string(),
    }
}

#[doc(hidden)]
pub fn build_schema(
    name: &'static str,
    base: &[&CompositeSchema],
    own: Vec<FieldDescriptor>,
) -> CompositeSchema {
    match base.first() {
        Some(base) => CompositeSchema::extend(name, base, own),
        None => CompositeSchema::new(name, own),
    }
}

/// Writes `{name: value, ...}` over all fields.
#[doc(hidden)]
pub fn fmt_fields<C: Composite>(composite: &C, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (descriptor, codec)) in C::schema()
        .fields()
        .iter()
        .zip(composite.fields())
        .enumerate()
    {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", descriptor.name, codec)?;
    }
    f.write_str("}")
}

#[doc(hidden)]
#[macro_export]
macro_rules! __serial_init {
    ($ty:ty) => {
        <$ty as ::core::default::Default>::default()
    };
    ($ty:ty, $init:expr) => {
        $init
    };
}

/// Declares a composite.
///
/// ```text
/// serial_composite! {
///     pub struct Name [extends Base] {
///         field [/ setter]: CodecType [= initial codec expression],
///         ...
///     }
/// }
/// ```
///
/// Generates a struct with one public codec per field (plus `base` when
/// extending, with `Deref` to it), a typed getter per field, a typed setter
/// for each field that names one, and the [`Codec`], [`Serializable`] and
/// [`Composite`] impls. Whether a field accepts raw values by name follows
/// its codec type ([`Serializable::SETTABLE`]), not the setter. The initial expression replaces `Default` for that
/// field, for example to choose a byte order.
#[macro_export]
macro_rules! serial_composite {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(extends $base:ty)? {
            $(
                $(#[$fmeta:meta])*
                $field:ident $(/ $setter:ident)? : $ty:ty $(= $init:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(pub base: $base,)?
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            /// Creates an instance with every field at its default.
            pub fn new() -> Self {
                <Self as ::core::default::Default>::default()
            }

            $(
                pub fn $field(&self) -> <$ty as $crate::Field>::Output<'_> {
                    $crate::Field::read(&self.$field)
                }

                $(
                    pub fn $setter<V>(&mut self, value: V) -> ::core::result::Result<(), $crate::ValidationError>
                    where
                        $ty: $crate::Assign<V>,
                    {
                        $crate::Assign::assign(&mut self.$field, value)
                    }
                )?
            )*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $(base: <$base as ::core::default::Default>::default(),)?
                    $($field: $crate::__serial_init!($ty $(, $init)?),)*
                }
            }
        }

        $(
            impl ::core::ops::Deref for $name {
                type Target = $base;

                fn deref(&self) -> &$base {
                    &self.base
                }
            }

            impl ::core::ops::DerefMut for $name {
                fn deref_mut(&mut self) -> &mut $base {
                    &mut self.base
                }
            }
        )?

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::composite::fmt_fields(self, f)
            }
        }

        impl $crate::Codec for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            #[allow(unused_variables)]
            fn write(&self, writer: &mut $crate::codec::Writer) -> ::core::result::Result<(), $crate::EncodeError> {
                $(<$base as $crate::Codec>::write(&self.base, writer)?;)?
                $($crate::Codec::write(&self.$field, writer)?;)*
                Ok(())
            }

            fn load_in_place(
                &mut self,
                reader: &mut $crate::codec::Reader<'_>,
            ) -> ::core::result::Result<(), $crate::DecodeError> {
                $crate::__private::log::trace!(
                    "decoding {} at offset {}",
                    stringify!($name),
                    reader.position()
                );
                let mut next = ::core::clone::Clone::clone(self);
                $(<$base as $crate::Codec>::load_in_place(&mut next.base, reader)?;)?
                $($crate::Codec::load_in_place(&mut next.$field, reader)?;)*
                *self = next;
                Ok(())
            }
        }

        impl ::core::convert::TryFrom<$crate::Value> for $name {
            type Error = $crate::ValidationError;

            fn try_from(value: $crate::Value) -> ::core::result::Result<Self, Self::Error> {
                Err(value.wrong_kind(stringify!($name)))
            }
        }

        impl $crate::Serializable for $name {
            const SETTABLE: bool = false;
        }

        impl $crate::Field for $name {
            type Output<'a> = &'a $name;

            fn read(&self) -> &$name {
                self
            }
        }

        impl $crate::Assign<$name> for $name {
            fn assign(&mut self, value: $name) -> ::core::result::Result<(), $crate::ValidationError> {
                *self = value;
                Ok(())
            }
        }

        impl<'b> $crate::Assign<&'b $name> for $name {
            fn assign(&mut self, value: &'b $name) -> ::core::result::Result<(), $crate::ValidationError> {
                self.clone_from(value);
                Ok(())
            }
        }

        impl $crate::Composite for $name {
            fn schema() -> &'static $crate::schema::CompositeSchema {
                $crate::__private::lazy_static! {
                    static ref SCHEMA: $crate::schema::CompositeSchema = $crate::composite::build_schema(
                        stringify!($name),
                        &[$(<$base as $crate::Composite>::schema())?],
                        ::std::vec![$(
                            $crate::schema::FieldDescriptor {
                                name: stringify!($field),
                                type_name: stringify!($ty),
                                settable: <$ty as $crate::Serializable>::SETTABLE,
                            },
                        )*],
                    );
                }
                &SCHEMA
            }

            fn fields(&self) -> ::std::vec::Vec<&dyn $crate::Codec> {
                #[allow(unused_mut)]
                let mut fields: ::std::vec::Vec<&dyn $crate::Codec> = ::std::vec::Vec::new();
                $(fields.extend(<$base as $crate::Composite>::fields(&self.base));)?
                $(fields.push(&self.$field);)*
                fields
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<&mut dyn $crate::Codec> {
                #[allow(unused_mut)]
                let mut fields: ::std::vec::Vec<&mut dyn $crate::Codec> = ::std::vec::Vec::new();
                $(fields.extend(<$base as $crate::Composite>::fields_mut(&mut self.base));)?
                $(fields.push(&mut self.$field);)*
                fields
            }

            fn field(&self, name: &str) -> ::core::result::Result<&dyn $crate::Codec, $crate::ValidationError> {
                $(
                    if <$base as $crate::Composite>::schema().contains(name) {
                        return <$base as $crate::Composite>::field(&self.base, name);
                    }
                )?
                match name {
                    $(stringify!($field) => Ok(&self.$field as &dyn $crate::Codec),)*
                    _ => Err($crate::composite::unknown_field::<Self>(name)),
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::result::Result<&mut dyn $crate::Codec, $crate::ValidationError> {
                $(
                    if <$base as $crate::Composite>::schema().contains(name) {
                        return <$base as $crate::Composite>::field_mut(&mut self.base, name);
                    }
                )?
                match name {
                    $(stringify!($field) => Ok(&mut self.$field as &mut dyn $crate::Codec),)*
                    _ => Err($crate::composite::unknown_field::<Self>(name)),
                }
            }
        }
    };
}
